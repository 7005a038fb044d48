use std::cell::RefCell;

use catsync_baselinker::BaselinkerError;

use super::*;

/// Records every update call; fails for the product ids it is told to.
#[derive(Default)]
struct FakeProducts {
    calls: RefCell<Vec<(i64, i64)>>,
    failing: Vec<i64>,
}

impl FakeProducts {
    fn calls(&self) -> Vec<(i64, i64)> {
        self.calls.borrow().clone()
    }
}

impl ProductTarget for FakeProducts {
    async fn update_product_category(
        &self,
        product_id: i64,
        category_id: i64,
    ) -> Result<(), BaselinkerError> {
        self.calls.borrow_mut().push((product_id, category_id));
        if self.failing.contains(&product_id) {
            return Err(BaselinkerError::Api {
                code: "ERROR_PRODUCT".to_owned(),
                message: "rejected".to_owned(),
            });
        }
        Ok(())
    }
}

fn source(title: &str, sku: Option<&str>, category: Option<&str>) -> SourceProduct {
    SourceProduct {
        id: format!("gid://shopify/Product/{title}"),
        title: title.to_owned(),
        sku: sku.map(str::to_owned),
        category_name: category.map(str::to_owned),
        category_path: category.map(str::to_owned),
    }
}

fn target_product(id: i64, sku: &str, category_id: Option<i64>) -> TargetProduct {
    TargetProduct {
        id,
        sku: Some(sku.to_owned()),
        current_category_id: category_id,
        name: None,
    }
}

fn categories() -> Vec<RemoteCategory> {
    vec![
        RemoteCategory {
            id: 5,
            name: "Shoes".to_owned(),
            parent_id: 0,
        },
        RemoteCategory {
            id: 6,
            name: "Shirts".to_owned(),
            parent_id: 0,
        },
    ]
}

#[tokio::test]
async fn product_already_in_category_is_left_alone() {
    let source = [source("Trail Runner", Some("X1"), Some("Shoes"))];
    let targets = [target_product(10, "X1", Some(5))];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert!(fake.calls().is_empty());
    assert_eq!(report.matched, 1);
    assert_eq!(report.unchanged, 1);
    assert_eq!(report.updated, 0);
}

#[tokio::test]
async fn product_in_other_category_is_moved() {
    let source = [source("Trail Runner", Some("X1"), Some("Shoes"))];
    let targets = [target_product(10, "X1", Some(6))];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert_eq!(fake.calls(), [(10, 5)]);
    assert_eq!(report.updated, 1);
}

#[tokio::test]
async fn uncategorized_target_is_moved() {
    let source = [source("Trail Runner", Some("X1"), Some("Shoes"))];
    let targets = [target_product(10, "X1", None)];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert_eq!(fake.calls(), [(10, 5)]);
    assert_eq!(report.updated, 1);
}

#[tokio::test]
async fn duplicate_target_skus_update_only_the_first() {
    let source = [source("Trail Runner", Some("X1"), Some("Shoes"))];
    let targets = [
        target_product(10, "X1", None),
        target_product(11, "X1", None),
    ];
    let fake = FakeProducts::default();

    assign(&source, &targets, &categories(), &fake, false).await;

    assert_eq!(fake.calls(), [(10, 5)]);
}

#[tokio::test]
async fn duplicate_source_skus_keep_the_first_product() {
    let source = [
        source("Trail Runner", Some("X1"), Some("Shoes")),
        source("Trail Runner Copy", Some("X1"), Some("Shirts")),
    ];
    let targets = [target_product(10, "X1", None)];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert_eq!(fake.calls(), [(10, 5)]);
    assert_eq!(report.skipped_duplicate_sku, 1);
}

#[tokio::test]
async fn products_without_sku_are_skipped() {
    let source = [
        source("No Sku", None, Some("Shoes")),
        source("Blank Sku", Some("  "), Some("Shoes")),
    ];
    let targets = [target_product(10, "X1", None)];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert!(fake.calls().is_empty());
    assert_eq!(report.skipped_no_sku, 2);
    assert_eq!(report.matched, 0);
}

#[tokio::test]
async fn sku_missing_from_target_is_skipped() {
    let source = [source("Trail Runner", Some("x1"), Some("Shoes"))];
    let targets = [target_product(10, "X1", None)];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert!(fake.calls().is_empty());
    assert_eq!(report.skipped_unmatched, 1);
}

#[tokio::test]
async fn product_without_category_is_skipped() {
    let source = [source("Gift Card", Some("X1"), None)];
    let targets = [target_product(10, "X1", None)];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert!(fake.calls().is_empty());
    assert_eq!(report.matched, 1);
    assert_eq!(report.skipped_no_category, 1);
}

#[tokio::test]
async fn unknown_category_is_skipped_without_update() {
    let source = [source("Mug", Some("X1"), Some("Kitchen"))];
    let targets = [target_product(10, "X1", None)];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert!(fake.calls().is_empty());
    assert_eq!(report.skipped_unknown_category, 1);
}

#[tokio::test]
async fn dry_run_issues_no_updates() {
    let source = [
        source("Trail Runner", Some("X1"), Some("Shoes")),
        source("Tee", Some("X2"), Some("Shirts")),
    ];
    let targets = [
        target_product(10, "X1", None),
        target_product(11, "X2", Some(6)),
    ];
    let fake = FakeProducts::default();

    let report = assign(&source, &targets, &categories(), &fake, true).await;

    assert!(fake.calls().is_empty());
    assert_eq!(report.planned, 1);
    assert_eq!(report.unchanged, 1);
}

#[tokio::test]
async fn failed_update_is_counted_and_the_rest_continue() {
    let source = [
        source("Trail Runner", Some("X1"), Some("Shoes")),
        source("Tee", Some("X2"), Some("Shirts")),
    ];
    let targets = [
        target_product(10, "X1", None),
        target_product(11, "X2", None),
    ];
    let fake = FakeProducts {
        failing: vec![10],
        ..FakeProducts::default()
    };

    let report = assign(&source, &targets, &categories(), &fake, false).await;

    assert_eq!(fake.calls(), [(10, 5), (11, 6)]);
    assert_eq!(report.failed, 1);
    assert_eq!(report.updated, 1);
}

#[test]
fn map_by_sku_keeps_source_order() {
    let source = [
        source("B", Some("X2"), None),
        source("A", Some("X1"), None),
    ];
    let targets = [target_product(10, "X1", None)];
    let index = SkuIndex::build(&targets);
    let mut report = AssignReport::default();

    let mappings = map_by_sku(&source, &index, &mut report);

    let skus: Vec<&str> = mappings.iter().map(|m| m.sku).collect();
    assert_eq!(skus, ["X2", "X1"]);
    assert!(mappings[0].target.is_none());
    assert_eq!(mappings[1].target.map(|t| t.id), Some(10));
}
