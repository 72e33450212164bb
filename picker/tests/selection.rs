//! Multi-select behavior through the controller

mod common;

use common::*;
use picker::*;
use shared::{DEFAULT_VARIANT_TITLE, ProductId, SelectedProduct};

async fn opened_with(catalog: Vec<shared::Product>) -> SearchSelectionController<MockCatalogSearchProvider> {
    let mut controller = ControllerBuilder::new().serving(catalog).build();
    TestHelpers::open_and_settle(&mut controller).await;
    controller
}

fn catalog() -> Vec<shared::Product> {
    vec![
        TestFixtures::product_a(),
        TestFixtures::product_b(),
        TestFixtures::product_c(),
    ]
}

fn variant_ids(selection: &SelectedProduct) -> Vec<String> {
    selection
        .variants
        .iter()
        .filter_map(|v| v.id.clone())
        .collect()
}

#[tokio::test]
async fn test_selecting_seeds_first_variant() {
    let mut controller = opened_with(catalog()).await;
    let a = TestFixtures::id("A");

    assert_eq!(controller.toggle_product_selected(&a), Ok(ProductToggle::Selected));
    assert!(controller.is_selected(&a));
    assert!(controller.is_variant_selected(&a, &TestFixtures::variant("v1")));
    assert!(!controller.is_variant_selected(&a, &TestFixtures::variant("v2")));
}

#[tokio::test]
async fn test_product_without_variants_gets_placeholder() {
    let mut controller = opened_with(catalog()).await;
    let b = TestFixtures::id("B");

    controller.toggle_product_selected(&b).unwrap();
    let variants = controller.selected_variants(&b).unwrap();
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0].title, DEFAULT_VARIANT_TITLE);
    assert_eq!(variants[0].id, None);
}

#[tokio::test]
async fn test_selected_iff_toggled_odd_times() {
    let products = TestFixtures::numbered(1, 8);
    let mut controller = opened_with(products.clone()).await;
    let mut counts = vec![0u32; products.len()];

    // Fixed linear congruential sequence so the run is reproducible
    let mut state: u64 = 0x2545_f491;
    for _ in 0..200 {
        state = state.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        let index = (state >> 33) as usize % products.len();
        controller.toggle_product_selected(&products[index].id).unwrap();
        counts[index] += 1;
    }

    for (product, count) in products.iter().zip(&counts) {
        assert_eq!(controller.is_selected(&product.id), count % 2 == 1, "product {}", product.id);
    }
}

#[tokio::test]
async fn test_variant_double_toggle_is_identity() {
    let mut controller = opened_with(catalog()).await;
    let a = TestFixtures::id("A");
    controller.toggle_product_selected(&a).unwrap();
    let before = controller.confirm_selection();

    let v2 = TestFixtures::variant("v2");
    assert_eq!(controller.toggle_variant_selected(&a, &v2), VariantToggle::Selected);
    assert_eq!(controller.toggle_variant_selected(&a, &v2), VariantToggle::Deselected);

    assert_eq!(controller.confirm_selection(), before);
}

#[tokio::test]
async fn test_confirm_returns_chosen_variants() {
    let mut controller = opened_with(catalog()).await;
    let a = TestFixtures::id("A");
    controller.toggle_product_selected(&a).unwrap();
    controller.toggle_variant_selected(&a, &TestFixtures::variant("v2"));

    let selection = controller.confirm_selection();
    assert_eq!(selection.len(), 1);
    assert_eq!(selection[0].product.id, a);
    assert_eq!(variant_ids(&selection[0]), vec!["v1", "v2"]);
}

#[tokio::test]
async fn test_clearing_variants_keeps_product_selected() {
    let mut controller = opened_with(catalog()).await;
    let a = TestFixtures::id("A");
    controller.toggle_product_selected(&a).unwrap();

    assert_eq!(
        controller.toggle_variant_selected(&a, &TestFixtures::variant("v1")),
        VariantToggle::Deselected
    );
    assert!(controller.is_selected(&a));
    let selection = controller.confirm_selection();
    assert_eq!(selection.len(), 1);
    assert!(selection[0].variants.is_empty());
}

#[tokio::test]
async fn test_variant_toggle_ignored_without_product() {
    let mut controller = opened_with(catalog()).await;
    let a = TestFixtures::id("A");

    assert_eq!(
        controller.toggle_variant_selected(&a, &TestFixtures::variant("v2")),
        VariantToggle::Ignored
    );
    assert!(!controller.is_selected(&a));

    controller.toggle_product_selected(&a).unwrap();
    assert_eq!(
        controller.toggle_variant_selected(&a, &TestFixtures::variant("v9")),
        VariantToggle::Ignored
    );
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
    let mut controller = opened_with(catalog()).await;
    let missing = ProductId::new("nope");

    assert_eq!(
        controller.toggle_product_selected(&missing),
        Err(PickerError::UnknownProduct { id: missing.clone() })
    );
    assert_eq!(controller.selection_len(), 0);
}

#[tokio::test]
async fn test_selection_keeps_first_selected_order() {
    let mut controller = opened_with(catalog()).await;
    let (a, b, c) = (TestFixtures::id("A"), TestFixtures::id("B"), TestFixtures::id("C"));

    controller.toggle_product_selected(&c).unwrap();
    controller.toggle_product_selected(&a).unwrap();
    controller.toggle_product_selected(&b).unwrap();
    controller.toggle_product_selected(&c).unwrap();
    controller.toggle_product_selected(&c).unwrap();

    let selection = controller.confirm_selection();
    assert_eq!(TestHelpers::selected_ids(&selection), vec![a, b, c]);
}

#[tokio::test]
async fn test_snapshot_is_detached() {
    let mut controller = opened_with(catalog()).await;
    let a = TestFixtures::id("A");
    controller.toggle_product_selected(&a).unwrap();

    let snapshot = controller.confirm_selection();
    controller.toggle_variant_selected(&a, &TestFixtures::variant("v3"));
    controller.toggle_product_selected(&TestFixtures::id("B")).unwrap();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(variant_ids(&snapshot[0]), vec!["v1"]);
}

#[tokio::test(start_paused = true)]
async fn test_deselect_after_new_search() {
    let mut controller = ControllerBuilder::new()
        .with_provider(|provider| {
            provider
                .expect_search()
                .withf(|query| query.text.is_empty())
                .returning(|_| Ok(catalog().into()));
            provider
                .expect_search()
                .withf(|query| query.text == "shoe")
                .returning(|_| Ok(TestFixtures::shoes().into()));
        })
        .build();
    TestHelpers::open_and_settle(&mut controller).await;

    let a = TestFixtures::id("A");
    controller.toggle_product_selected(&a).unwrap();

    controller.set_search_text("shoe");
    controller.settle().await;
    assert!(controller.results().iter().all(|p| p.id != a));

    // Still selected, so it can be dropped even though it is not listed
    assert!(controller.is_selected(&a));
    assert_eq!(controller.toggle_product_selected(&a), Ok(ProductToggle::Deselected));
    assert!(matches!(
        controller.toggle_product_selected(&a),
        Err(PickerError::UnknownProduct { .. })
    ));
}

#[tokio::test]
async fn test_confirm_hands_selection_to_consumer() {
    let mut controller = opened_with(catalog()).await;
    controller.toggle_product_selected(&TestFixtures::id("B")).unwrap();
    controller.toggle_product_selected(&TestFixtures::id("A")).unwrap();

    let mut consumer = MockSelectionConsumer::new();
    consumer
        .expect_on_confirm()
        .withf(|selection| {
            selection.len() == 2 && selection[0].product.id.as_str() == "B" && selection[1].product.id.as_str() == "A"
        })
        .times(1)
        .return_const(());
    consumer.expect_on_cancel().never();

    controller.confirm(&mut consumer);
}

#[tokio::test]
async fn test_cancel_discards_selection() {
    let mut controller = opened_with(catalog()).await;
    controller.toggle_product_selected(&TestFixtures::id("A")).unwrap();

    let mut consumer = MockSelectionConsumer::new();
    consumer.expect_on_confirm().never();
    consumer.expect_on_cancel().times(1).return_const(());

    controller.cancel(&mut consumer);
}
