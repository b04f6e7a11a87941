//! `SeaORM` entity definitions.
//!
//! Table and column names are the stored wire contract and stay in
//! Portuguese; the domain types in `caixa-core` carry the English names.

pub mod centros_de_custo;
pub mod compras;
pub mod contador_transacoes;
pub mod itens_compra;
pub mod itens_condicionais;
pub mod itens_venda;
pub mod lancamentos_financeiros;
pub mod movimentacoes_estoque;
pub mod produtos;
pub mod sea_orm_active_enums;
pub mod transacoes_condicionais;
pub mod vendas;
