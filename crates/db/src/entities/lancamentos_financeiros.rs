//! `SeaORM` Entity for lancamentos_financeiros table.
//!
//! The installment descriptor `{atual, total}` and the recurrence descriptor
//! `{tipo, prazo, qtd, atual}` or `{tipo, dia}` are nullable JSON columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{StatusLancamento, TipoLancamento};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "lancamentos_financeiros")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub descricao: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub valor: Decimal,
    pub tipo: TipoLancamento,
    pub data_prevista: Date,
    pub data_lancamento: Option<Date>,
    pub centro_custo_id: Option<Uuid>,
    pub caixa_id: Option<Uuid>,
    pub status: StatusLancamento,
    pub origem: String,
    pub parcelamento: Option<Json>,
    pub recorrencia: Option<Json>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::centros_de_custo::Entity",
        from = "Column::CentroCustoId",
        to = "super::centros_de_custo::Column::Id",
        on_delete = "SetNull"
    )]
    CentrosDeCusto,
}

impl Related<super::centros_de_custo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CentrosDeCusto.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
