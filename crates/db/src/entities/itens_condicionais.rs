//! `SeaORM` Entity for itens_condicionais table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::StatusItemCondicional;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "itens_condicionais")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub transacao_id: Uuid,
    pub produto_id: Option<Uuid>,
    pub descricao: String,
    pub categoria: String,
    pub quantidade: i32,
    pub status: StatusItemCondicional,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))", nullable)]
    pub valor_efetivado: Option<Decimal>,
    pub data_resolucao: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transacoes_condicionais::Entity",
        from = "Column::TransacaoId",
        to = "super::transacoes_condicionais::Column::Id",
        on_delete = "Cascade"
    )]
    TransacoesCondicionais,
}

impl Related<super::transacoes_condicionais::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransacoesCondicionais.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
