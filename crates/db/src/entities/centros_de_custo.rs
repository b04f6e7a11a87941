//! `SeaORM` Entity for centros_de_custo table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{ContextoCentroCusto, RecorrenciaCentroCusto, TipoCentroCusto};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "centros_de_custo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nome: String,
    pub contexto: ContextoCentroCusto,
    pub tipo: TipoCentroCusto,
    pub categoria: String,
    pub recorrencia: RecorrenciaCentroCusto,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::lancamentos_financeiros::Entity")]
    LancamentosFinanceiros,
}

impl Related<super::lancamentos_financeiros::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LancamentosFinanceiros.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
