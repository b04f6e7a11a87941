//! `SeaORM` active enums and their mapping to domain enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use caixa_core::calendar::Cadence;
use caixa_core::conditional::{ConditionalDirection, ConditionalStatus, ItemStatus};
use caixa_core::cost_center::{CostCenterContext, CostCenterKind, CostCenterRecurrence};
use caixa_core::schedule::{EntryKind, EntryStatus};
use caixa_core::stock::MovementKind;
use caixa_core::trade::PaymentStatus;

/// Maps a domain enum onto an active enum and back, variant by variant.
macro_rules! mirror_enum {
    ($db:ident <=> $domain:ident { $($dv:ident <=> $cv:ident),+ $(,)? }) => {
        impl From<$domain> for $db {
            fn from(value: $domain) -> Self {
                match value {
                    $($domain::$cv => Self::$dv,)+
                }
            }
        }

        impl From<$db> for $domain {
            fn from(value: $db) -> Self {
                match value {
                    $($db::$dv => Self::$cv,)+
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TipoLancamento {
    #[sea_orm(string_value = "entrada")]
    Entrada,
    #[sea_orm(string_value = "saida")]
    Saida,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StatusLancamento {
    #[sea_orm(string_value = "previsto")]
    Previsto,
    #[sea_orm(string_value = "realizado")]
    Realizado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TipoMovimentacao {
    #[sea_orm(string_value = "entrada")]
    Entrada,
    #[sea_orm(string_value = "saida")]
    Saida,
    #[sea_orm(string_value = "ajuste")]
    Ajuste,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StatusPagamento {
    #[sea_orm(string_value = "pendente")]
    Pendente,
    #[sea_orm(string_value = "pago")]
    Pago,
    #[sea_orm(string_value = "parcial")]
    Parcial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PrazoParcelas {
    #[sea_orm(string_value = "diaria")]
    Diaria,
    #[sea_orm(string_value = "semanal")]
    Semanal,
    #[sea_orm(string_value = "10dias")]
    DezDias,
    #[sea_orm(string_value = "quinzenal")]
    Quinzenal,
    #[sea_orm(string_value = "20dias")]
    VinteDias,
    #[sea_orm(string_value = "mensal")]
    Mensal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ContextoCentroCusto {
    #[sea_orm(string_value = "casa")]
    Casa,
    #[sea_orm(string_value = "loja")]
    Loja,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TipoCentroCusto {
    #[sea_orm(string_value = "RECEITA")]
    Receita,
    #[sea_orm(string_value = "DESPESA")]
    Despesa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RecorrenciaCentroCusto {
    #[sea_orm(string_value = "FIXO")]
    Fixo,
    #[sea_orm(string_value = "VARIAVEL")]
    Variavel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TipoCondicional {
    #[sea_orm(string_value = "recebido")]
    Recebido,
    #[sea_orm(string_value = "enviado")]
    Enviado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StatusCondicional {
    #[sea_orm(string_value = "pendente")]
    Pendente,
    #[sea_orm(string_value = "resolvido")]
    Resolvido,
    #[sea_orm(string_value = "cancelado")]
    Cancelado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StatusItemCondicional {
    #[sea_orm(string_value = "pendente")]
    Pendente,
    #[sea_orm(string_value = "devolvido")]
    Devolvido,
    #[sea_orm(string_value = "efetivado")]
    Efetivado,
}

mirror_enum!(TipoLancamento <=> EntryKind { Entrada <=> In, Saida <=> Out });
mirror_enum!(StatusLancamento <=> EntryStatus { Previsto <=> Scheduled, Realizado <=> Realized });
mirror_enum!(TipoMovimentacao <=> MovementKind {
    Entrada <=> Entry,
    Saida <=> Exit,
    Ajuste <=> Adjustment,
});
mirror_enum!(StatusPagamento <=> PaymentStatus {
    Pendente <=> Pending,
    Pago <=> Paid,
    Parcial <=> Partial,
});
mirror_enum!(PrazoParcelas <=> Cadence {
    Diaria <=> Daily,
    Semanal <=> Weekly,
    DezDias <=> TenDays,
    Quinzenal <=> Biweekly,
    VinteDias <=> TwentyDays,
    Mensal <=> Monthly,
});
mirror_enum!(ContextoCentroCusto <=> CostCenterContext { Casa <=> House, Loja <=> Store });
mirror_enum!(TipoCentroCusto <=> CostCenterKind { Receita <=> Revenue, Despesa <=> Expense });
mirror_enum!(RecorrenciaCentroCusto <=> CostCenterRecurrence { Fixo <=> Fixed, Variavel <=> Variable });
mirror_enum!(TipoCondicional <=> ConditionalDirection { Recebido <=> Received, Enviado <=> Sent });
mirror_enum!(StatusCondicional <=> ConditionalStatus {
    Pendente <=> Pending,
    Resolvido <=> Resolved,
    Cancelado <=> Cancelled,
});
mirror_enum!(StatusItemCondicional <=> ItemStatus {
    Pendente <=> Pending,
    Devolvido <=> Returned,
    Efetivado <=> Settled,
});
