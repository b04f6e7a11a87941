//! Shared transaction-number counter.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::entities::contador_transacoes;

const COUNTER_ROW: i32 = 1;

/// Hands out the next number shared by purchases, sales and conditional
/// transfers. Runs inside the caller's transaction so a rollback also
/// returns the number.
///
/// The increment is a single `UPDATE ... SET ultimo_numero = ultimo_numero + 1`,
/// so the row stays write-locked until the caller commits and concurrent
/// checkouts queue behind it instead of reading the same value.
pub(crate) async fn next_transaction_number(txn: &DatabaseTransaction) -> Result<i64, DbErr> {
    let updated = contador_transacoes::Entity::update_many()
        .col_expr(
            contador_transacoes::Column::UltimoNumero,
            Expr::col(contador_transacoes::Column::UltimoNumero).add(1),
        )
        .filter(contador_transacoes::Column::Id.eq(COUNTER_ROW))
        .exec(txn)
        .await?;

    if updated.rows_affected == 0 {
        // Seeded by the migration; only databases created before the seed land here.
        // A concurrent insert fails on the primary key rather than sharing a number.
        contador_transacoes::ActiveModel {
            id: Set(COUNTER_ROW),
            ultimo_numero: Set(1),
        }
        .insert(txn)
        .await?;
        return Ok(1);
    }

    contador_transacoes::Entity::find_by_id(COUNTER_ROW)
        .one(txn)
        .await?
        .map(|row| row.ultimo_numero)
        .ok_or_else(|| DbErr::RecordNotFound("contador_transacoes".to_string()))
}
