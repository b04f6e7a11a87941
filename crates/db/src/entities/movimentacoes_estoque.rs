//! `SeaORM` Entity for movimentacoes_estoque table. Append-only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::TipoMovimentacao;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movimentacoes_estoque")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub produto_id: Uuid,
    pub tipo: TipoMovimentacao,
    pub quantidade: i32,
    pub observacao: String,
    pub data: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::produtos::Entity",
        from = "Column::ProdutoId",
        to = "super::produtos::Column::Id",
        on_delete = "Cascade"
    )]
    Produtos,
}

impl Related<super::produtos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Produtos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
