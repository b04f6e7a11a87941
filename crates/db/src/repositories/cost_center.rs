//! Cost center repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, warn};

use caixa_core::cost_center::{CostCenterContext, CostCenterDraft, CostCenterKind};
use caixa_shared::types::CostCenterId;

use crate::entities::centros_de_custo;
use crate::entities::sea_orm_active_enums::{ContextoCentroCusto, TipoCentroCusto};

/// Error types for cost center operations.
#[derive(Debug, thiserror::Error)]
pub enum CostCenterError {
    /// Name is blank after trimming.
    #[error("Nome do centro de custo é obrigatório")]
    InvalidName,

    /// Cost center not found.
    #[error("Centro de custo não encontrado: {0}")]
    NotFound(CostCenterId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filters for listing cost centers.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CostCenterFilter {
    /// Only this context.
    pub context: Option<CostCenterContext>,
    /// Only revenue or only expense.
    pub kind: Option<CostCenterKind>,
    /// Name contains this text (case insensitive).
    pub name: Option<String>,
}

/// Cost center repository.
#[derive(Debug, Clone)]
pub struct CostCenterRepository {
    db: DatabaseConnection,
}

impl CostCenterRepository {
    /// Creates a new cost center repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a cost center with normalized name and category.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` for a blank name.
    pub async fn create(
        &self,
        draft: CostCenterDraft,
    ) -> Result<centros_de_custo::Model, CostCenterError> {
        let draft = draft.normalized().ok_or(CostCenterError::InvalidName)?;

        let model = centros_de_custo::ActiveModel {
            id: Set(CostCenterId::new().into_inner()),
            nome: Set(draft.name),
            contexto: Set(draft.context.into()),
            tipo: Set(draft.kind.into()),
            categoria: Set(draft.category),
            recorrencia: Set(draft.recurrence.into()),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        info!(cost_center_id = %model.id, name = %model.nome, "Cost center created");
        Ok(model)
    }

    /// Lists cost centers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &CostCenterFilter,
    ) -> Result<Vec<centros_de_custo::Model>, DbErr> {
        let mut condition = Condition::all();
        if let Some(context) = filter.context {
            condition = condition
                .add(centros_de_custo::Column::Contexto.eq(ContextoCentroCusto::from(context)));
        }
        if let Some(kind) = filter.kind {
            condition = condition.add(centros_de_custo::Column::Tipo.eq(TipoCentroCusto::from(kind)));
        }
        if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            condition = condition.add(centros_de_custo::Column::Nome.contains(name.to_uppercase()));
        }

        centros_de_custo::Entity::find()
            .filter(condition)
            .order_by_asc(centros_de_custo::Column::Nome)
            .all(&self.db)
            .await
    }

    /// Hard-deletes a cost center. Entries that referenced it lose the link.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing was deleted.
    pub async fn delete(&self, id: CostCenterId) -> Result<(), CostCenterError> {
        let result = centros_de_custo::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(CostCenterError::NotFound(id));
        }
        info!(cost_center_id = %id, "Cost center deleted");
        Ok(())
    }

    /// Display name of a cost center, `None` when missing or unreadable.
    pub async fn name_of(&self, id: CostCenterId) -> Option<String> {
        match centros_de_custo::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
        {
            Ok(found) => found.map(|c| c.nome),
            Err(e) => {
                warn!(error = %e, cost_center_id = %id, "Cost center name lookup failed");
                None
            }
        }
    }
}
