//! Initial schema.
//!
//! Tables are derived from the entity definitions so the same migration
//! runs on PostgreSQL in production and on SQLite in tests.

use sea_orm::{ActiveModelTrait, EntityTrait, Schema, Set};
use sea_orm_migration::prelude::*;

use crate::entities::{
    centros_de_custo, compras, contador_transacoes, itens_compra, itens_condicionais,
    itens_venda, lancamentos_financeiros, movimentacoes_estoque, produtos,
    transacoes_condicionais, vendas,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create<E: EntityTrait>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr> {
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Parents before children.
        create(manager, &schema, centros_de_custo::Entity).await?;
        create(manager, &schema, lancamentos_financeiros::Entity).await?;
        create(manager, &schema, produtos::Entity).await?;
        create(manager, &schema, movimentacoes_estoque::Entity).await?;
        create(manager, &schema, compras::Entity).await?;
        create(manager, &schema, itens_compra::Entity).await?;
        create(manager, &schema, vendas::Entity).await?;
        create(manager, &schema, itens_venda::Entity).await?;
        create(manager, &schema, transacoes_condicionais::Entity).await?;
        create(manager, &schema, itens_condicionais::Entity).await?;
        create(manager, &schema, contador_transacoes::Entity).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lancamentos_user_data")
                    .table(lancamentos_financeiros::Entity)
                    .col(lancamentos_financeiros::Column::UserId)
                    .col(lancamentos_financeiros::Column::DataPrevista)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movimentacoes_produto")
                    .table(movimentacoes_estoque::Entity)
                    .col(movimentacoes_estoque::Column::ProdutoId)
                    .col(movimentacoes_estoque::Column::Data)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_produtos_descricao")
                    .table(produtos::Entity)
                    .col(produtos::Column::Descricao)
                    .to_owned(),
            )
            .await?;

        // One number per header across the three numbered tables.
        manager
            .create_index(
                Index::create()
                    .name("uq_compras_numero_transacao")
                    .table(compras::Entity)
                    .col(compras::Column::NumeroTransacao)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_vendas_numero_transacao")
                    .table(vendas::Entity)
                    .col(vendas::Column::NumeroTransacao)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_transacoes_condicionais_numero_transacao")
                    .table(transacoes_condicionais::Entity)
                    .col(transacoes_condicionais::Column::NumeroTransacao)
                    .unique()
                    .to_owned(),
            )
            .await?;

        contador_transacoes::ActiveModel {
            id: Set(1),
            ultimo_numero: Set(0),
        }
        .insert(manager.get_connection())
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Children before parents.
        manager.drop_table(Table::drop().table(contador_transacoes::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(itens_condicionais::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(transacoes_condicionais::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(itens_venda::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(vendas::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(itens_compra::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(compras::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(movimentacoes_estoque::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(produtos::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(lancamentos_financeiros::Entity).to_owned()).await?;
        manager.drop_table(Table::drop().table(centros_de_custo::Entity).to_owned()).await
    }
}
