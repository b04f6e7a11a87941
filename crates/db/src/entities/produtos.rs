//! `SeaORM` Entity for produtos table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "produtos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub codigo: String,
    pub descricao: String,
    pub categoria: String,
    pub quantidade: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub preco_custo: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub valor_repasse: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub preco_venda: Decimal,
    pub data_ultima_compra: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movimentacoes_estoque::Entity")]
    MovimentacoesEstoque,
}

impl Related<super::movimentacoes_estoque::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovimentacoesEstoque.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
