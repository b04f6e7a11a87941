//! Integration tests for purchase/sale recording and reversal.

mod common;

use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, Set};

use caixa_core::trade::{
    ExistingProductLine, NewProductLine, PaymentStatus, PaymentTerms, TradeDraft, TradeError,
    TradeKind, TradeLine,
};
use caixa_db::entities::sea_orm_active_enums::StatusPagamento;
use caixa_db::entities::{compras, itens_compra, movimentacoes_estoque, produtos, vendas};
use caixa_db::repositories::{StockError, StockRepository, TradeRepoError, TradeRepository};
use caixa_shared::MissingProductPolicy;
use caixa_shared::types::ProductId;

use common::{day, on_hand, product, setup};

fn existing(p: &produtos::Model, quantity: i32) -> TradeLine {
    TradeLine::Existing(ExistingProductLine {
        product_id: ProductId::from_uuid(p.id),
        description: p.descricao.clone(),
        category: p.categoria.clone(),
        quantity,
        cost_price: dec!(10),
        sale_price: dec!(25),
    })
}

fn draft(kind: TradeKind, lines: Vec<TradeLine>) -> TradeDraft {
    TradeDraft {
        kind,
        counterparty: "Maria".to_string(),
        date: day(2024, 3, 15),
        lines,
        terms: PaymentTerms::default(),
    }
}

#[tokio::test]
async fn test_purchase_then_delete_restores_quantities() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 5).await;
    let dress = product(&db, "VESTIDO", 0).await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);

    let recorded = repo
        .record(&draft(
            TradeKind::Purchase,
            vec![existing(&shirt, 3), existing(&dress, 2)],
        ))
        .await
        .unwrap();

    assert_eq!(recorded.total, dec!(50));
    assert_eq!(recorded.skipped_lines, 0);
    assert_eq!(on_hand(&db, shirt.id).await, 8);
    assert_eq!(on_hand(&db, dress.id).await, 2);

    repo.delete(TradeKind::Purchase, recorded.id).await.unwrap();

    assert_eq!(on_hand(&db, shirt.id).await, 5);
    assert_eq!(on_hand(&db, dress.id).await, 0);
    assert_eq!(compras::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(itens_compra::Entity::find().count(&db).await.unwrap(), 0);

    // entry + reversal exit for each product
    let movements = movimentacoes_estoque::Entity::find()
        .filter(movimentacoes_estoque::Column::ProdutoId.eq(shirt.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(movements.len(), 2);
    assert!(movements.iter().any(|m| m.observacao.starts_with("Estorno")));
}

#[tokio::test]
async fn test_sale_goes_negative_and_reverses() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 2).await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);

    let recorded = repo
        .record(&draft(TradeKind::Sale, vec![existing(&shirt, 5)]))
        .await
        .unwrap();

    assert_eq!(recorded.total, dec!(125));
    assert_eq!(on_hand(&db, shirt.id).await, -3);

    repo.delete(TradeKind::Sale, recorded.id).await.unwrap();
    assert_eq!(on_hand(&db, shirt.id).await, 2);
    assert_eq!(vendas::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_new_product_lines_register_products() {
    let db = setup().await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);
    let line = |description: &str| {
        TradeLine::New(NewProductLine {
            description: description.to_string(),
            category: "acessorios".to_string(),
            quantity: 4,
            cost_price: dec!(10),
            sale_price: dec!(30),
        })
    };

    repo.record(&draft(TradeKind::Purchase, vec![line("BOLSA")]))
        .await
        .unwrap();
    repo.record(&draft(TradeKind::Sale, vec![line("CINTO")]))
        .await
        .unwrap();

    let products = produtos::Entity::find().all(&db).await.unwrap();
    let bag = products.iter().find(|p| p.descricao == "BOLSA").unwrap();
    let belt = products.iter().find(|p| p.descricao == "CINTO").unwrap();

    assert_eq!(bag.quantidade, 4);
    assert_eq!(bag.valor_repasse, dec!(13));
    assert!(bag.codigo.starts_with('A'));
    assert_eq!(belt.quantidade, -4);
    assert_eq!(belt.preco_custo, Decimal::ZERO);
    assert_eq!(movimentacoes_estoque::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_transaction_numbers_are_shared_and_sequential() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 10).await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);

    let first = repo
        .record(&draft(TradeKind::Purchase, vec![existing(&shirt, 1)]))
        .await
        .unwrap();
    let second = repo
        .record(&draft(TradeKind::Sale, vec![existing(&shirt, 1)]))
        .await
        .unwrap();

    assert_eq!(first.number, 1);
    assert_eq!(second.number, 2);
}

#[tokio::test]
async fn test_concurrent_checkouts_get_distinct_numbers() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 50).await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);

    let drafts: Vec<TradeDraft> = (0..12)
        .map(|i| {
            let kind = if i % 2 == 0 { TradeKind::Purchase } else { TradeKind::Sale };
            draft(kind, vec![existing(&shirt, 1)])
        })
        .collect();
    let results = join_all(drafts.iter().map(|d| repo.record(d))).await;

    let mut numbers: Vec<i64> = results.into_iter().map(|r| r.unwrap().number).collect();
    numbers.sort_unstable();
    assert_eq!(numbers, (1..=12).collect::<Vec<i64>>());
}

#[tokio::test]
async fn test_duplicate_transaction_number_is_rejected() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 5).await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);
    let recorded = repo
        .record(&draft(TradeKind::Purchase, vec![existing(&shirt, 1)]))
        .await
        .unwrap();

    let header = compras::Entity::find_by_id(recorded.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut copy = header.into_active_model();
    copy.id = Set(uuid::Uuid::new_v4());

    assert!(copy.insert(&db).await.is_err());
    assert_eq!(compras::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_draft_writes_nothing() {
    let db = setup().await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);

    let mut bad = draft(TradeKind::Purchase, vec![]);
    bad.counterparty = "  ".to_string();
    let err = repo.record(&bad).await.unwrap_err();

    assert!(matches!(
        err,
        TradeRepoError::Validation(TradeError::MissingSupplier)
    ));
    assert_eq!(compras::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_missing_product_lenient_skips_stock() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 1).await;
    let mut ghost = shirt.clone();
    ghost.id = uuid::Uuid::new_v4();
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);

    let recorded = repo
        .record(&draft(
            TradeKind::Purchase,
            vec![existing(&shirt, 1), existing(&ghost, 3)],
        ))
        .await
        .unwrap();

    assert_eq!(recorded.skipped_lines, 1);
    assert_eq!(on_hand(&db, shirt.id).await, 2);
    let items = itens_compra::Entity::find().all(&db).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.iter().filter(|i| i.produto_id.is_none()).count(), 1);
}

#[tokio::test]
async fn test_missing_product_strict_rolls_back() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 1).await;
    let mut ghost = shirt.clone();
    ghost.id = uuid::Uuid::new_v4();
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Strict);

    let err = repo
        .record(&draft(
            TradeKind::Purchase,
            vec![existing(&shirt, 1), existing(&ghost, 3)],
        ))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TradeRepoError::Stock(StockError::ProductNotFound(id)) if id == ghost.id
    ));
    assert_eq!(on_hand(&db, shirt.id).await, 1);
    assert_eq!(compras::Entity::find().count(&db).await.unwrap(), 0);
    assert!(
        StockRepository::new(db.clone())
            .recent_movements()
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_mark_paid_and_installment_view() {
    let db = setup().await;
    let shirt = product(&db, "CAMISA", 10).await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);

    let mut sale = draft(TradeKind::Sale, vec![existing(&shirt, 4)]);
    sale.terms.installments = 2;
    let recorded = repo.record(&sale).await.unwrap();

    let rows = repo.installment_rows().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.value == dec!(50)));
    assert_eq!(rows[0].due_date, day(2024, 3, 15));
    assert_eq!(rows[1].due_date, day(2024, 4, 15));

    repo.mark_paid(TradeKind::Sale, recorded.id).await.unwrap();
    let header = vendas::Entity::find_by_id(recorded.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(header.status_pagamento, StatusPagamento::Pago);
    assert!(
        repo.installment_rows()
            .await
            .unwrap()
            .iter()
            .all(|r| r.status == PaymentStatus::Paid)
    );

    let missing = repo.mark_paid(TradeKind::Purchase, recorded.id).await;
    assert!(matches!(missing, Err(TradeRepoError::NotFound(TradeKind::Purchase, _))));
}

#[tokio::test]
async fn test_last_cost_price_prefers_latest_purchase() {
    let db = setup().await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);
    let products = caixa_db::ProductRepository::new(db.clone());
    let line = |cost: Decimal| {
        TradeLine::New(NewProductLine {
            description: "Saia".to_string(),
            category: "roupas".to_string(),
            quantity: 1,
            cost_price: cost,
            sale_price: dec!(40),
        })
    };

    let mut older = draft(TradeKind::Purchase, vec![line(dec!(12))]);
    older.date = day(2024, 1, 10);
    let mut newer = draft(TradeKind::Purchase, vec![line(dec!(15))]);
    newer.date = day(2024, 2, 10);
    repo.record(&older).await.unwrap();
    repo.record(&newer).await.unwrap();

    assert_eq!(products.last_cost_price("saia").await, Some(dec!(15)));
    assert_eq!(products.last_cost_price("blusa").await, None);
}

#[tokio::test]
async fn test_last_cost_price_matches_accented_descriptions() {
    let db = setup().await;
    let repo = TradeRepository::new(db.clone(), MissingProductPolicy::Lenient);
    let products = caixa_db::ProductRepository::new(db.clone());

    repo.record(&draft(
        TradeKind::Purchase,
        vec![TradeLine::New(NewProductLine {
            description: "Óculos Escuros".to_string(),
            category: "acessórios".to_string(),
            quantity: 2,
            cost_price: dec!(30),
            sale_price: dec!(70),
        })],
    ))
    .await
    .unwrap();

    assert_eq!(products.last_cost_price(" Óculos Escuros ").await, Some(dec!(30)));
    assert_eq!(products.last_cost_price("Óculos ESCUROS").await, Some(dec!(30)));
    // the whole description must match
    assert_eq!(products.last_cost_price("Óculos").await, None);
}
