//! `SeaORM` Entity for itens_compra table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "itens_compra")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub compra_id: Uuid,
    pub produto_id: Option<Uuid>,
    pub descricao: String,
    pub quantidade: i32,
    pub categoria: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub preco_custo: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub preco_venda: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::compras::Entity",
        from = "Column::CompraId",
        to = "super::compras::Column::Id",
        on_delete = "Cascade"
    )]
    Compras,
}

impl Related<super::compras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Compras.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
