//! `SeaORM` Entity for transacoes_condicionais table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{StatusCondicional, TipoCondicional};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transacoes_condicionais")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub numero_transacao: i64,
    pub tipo: TipoCondicional,
    pub origem: String,
    pub data_transacao: Date,
    pub observacao: Option<String>,
    pub status: StatusCondicional,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::itens_condicionais::Entity")]
    ItensCondicionais,
}

impl Related<super::itens_condicionais::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItensCondicionais.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
