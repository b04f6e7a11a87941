//! `SeaORM` Entity for itens_venda table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "itens_venda")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub venda_id: Uuid,
    pub produto_id: Option<Uuid>,
    pub descricao: String,
    pub quantidade: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub preco_venda: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vendas::Entity",
        from = "Column::VendaId",
        to = "super::vendas::Column::Id",
        on_delete = "Cascade"
    )]
    Vendas,
}

impl Related<super::vendas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vendas.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
