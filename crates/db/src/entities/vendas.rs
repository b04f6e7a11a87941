//! `SeaORM` Entity for vendas table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PrazoParcelas, StatusPagamento};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vendas")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub numero_transacao: i64,
    pub data_venda: Date,
    pub cliente: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total: Decimal,
    pub quantidade_itens: i32,
    pub forma_pagamento: String,
    pub status_pagamento: StatusPagamento,
    pub quantidade_parcelas: i32,
    pub prazoparcelas: PrazoParcelas,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::itens_venda::Entity")]
    ItensVenda,
}

impl Related<super::itens_venda::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItensVenda.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
