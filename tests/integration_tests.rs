mod common;

use common::{TestConfig, Workspace};
use slotting_optimizer::domain::model::{CollisionScope, OptimizerSettings};
use slotting_optimizer::{CsvSlottingPipeline, LocalStorage, SlottingEngine, SlottingError};

async fn run(
    workspace: &Workspace,
    config: TestConfig,
) -> slotting_optimizer::Result<slotting_optimizer::domain::model::LoadResult> {
    let input = LocalStorage::new(workspace.input_dir());
    let output = LocalStorage::new(workspace.output_dir());
    let pipeline = CsvSlottingPipeline::new(input, output, config);
    SlottingEngine::new(pipeline).run().await
}

#[tokio::test]
async fn test_end_to_end_slotting_run() {
    let workspace = Workspace::new();
    workspace.write_tables(
        "S1,Ice Cream,Frozen,5,F09-01\n\
         S2,Water,Ambient,120,B04-02\n\
         S3,Milk,Refrigerated,4,R02-01\n\
         S4,Chips,Ambient,2,C07-03\n",
        "F01-01,F01,Frozen,10\n\
         F01-02,F01,Frozen,3\n\
         R01-01,R01,Refrigerated,2\n\
         A01-01,A01,Ambient,15\n\
         B01-01,B01,Ambient,15\n\
         X01-01,X01,Quarantine,99\n",
        "O1,S4,2024-02-01 08:00:00\n\
         O2,S4,2024-02-01 09:00:00\n\
         O3,S2,2024-02-02 10:00:00\n\
         O4,S9,2024-02-03 11:00:00\n",
    );

    let result = run(&workspace, workspace.config()).await.unwrap();

    assert!(result.output_path.ends_with("final_slotting_plan.csv"));
    assert_eq!(
        workspace.read_output("final_slotting_plan.csv"),
        "SKU_ID,Bin_ID\n\
         S4,A01-01\n\
         S2,B01-01\n\
         S1,F01-01\n\
         S3,R02-01\n"
    );

    let summary = &result.summary;
    assert_eq!(summary.total_processed, 4);
    assert_eq!(summary.matched, 3);
    assert_eq!(summary.fallback, 1);
    assert_eq!(summary.weight_anomalies_corrected, 1);
    assert_eq!(summary.orders_ignored_unknown_sku, 1);
    assert_eq!(summary.unsupported_zone_slots, vec!["X01-01".to_string()]);
    assert!(summary.slot_collisions.is_empty());

    let corrected = workspace.read_output("sku_master_corrected.csv");
    assert!(corrected.contains("S2,Water,Ambient,120.0,12.0,B04-02"));

    let assignments: serde_json::Value =
        serde_json::from_str(&workspace.read_output("slotting_assignments.json")).unwrap();
    assert_eq!(assignments.as_array().unwrap().len(), 4);
    assert_eq!(assignments[3]["is_fallback"], serde_json::Value::Bool(true));

    let summary_doc: serde_json::Value =
        serde_json::from_str(&workspace.read_output("slotting_summary.json")).unwrap();
    assert_eq!(summary_doc["summary"]["fallback"], 1);
    assert_eq!(summary_doc["summary"]["collision_scope"], "non_fallback");
}

#[tokio::test]
async fn test_scenario_frozen_sku_skips_weak_slot() {
    let workspace = Workspace::new();
    workspace.write_tables(
        "S1,Peas,Frozen,5,OLD-1\n",
        "F02,F01,Frozen,3\nF01,F01,Frozen,10\n",
        "",
    );

    let result = run(&workspace, workspace.config()).await.unwrap();

    assert_eq!(
        workspace.read_output("final_slotting_plan.csv"),
        "SKU_ID,Bin_ID\nS1,F01\n"
    );
    assert_eq!(result.summary.matched, 1);
}

#[tokio::test]
async fn test_scenario_consumed_pool_falls_back_to_current_slot() {
    let workspace = Workspace::new();
    workspace.write_tables(
        "S1,Soda,Ambient,3,OLD-1\nS2,Rice,Ambient,120,OLD-2\n",
        "A01-01,A01,Ambient,20\n",
        "O1,S1,2024-01-01 00:00:00\n",
    );

    let result = run(&workspace, workspace.config()).await.unwrap();

    assert_eq!(
        workspace.read_output("final_slotting_plan.csv"),
        "SKU_ID,Bin_ID\nS1,A01-01\nS2,OLD-2\n"
    );
    assert_eq!(result.summary.fallback, 1);
}

#[tokio::test]
async fn test_scenario_higher_priority_gets_aisle_a() {
    let workspace = Workspace::new();
    workspace.write_tables(
        "S1,Cereal,Ambient,1,OLD-1\nS2,Pasta,Ambient,1,OLD-2\n",
        "B05-01,B05,Ambient,10\nA03-01,A03,Ambient,10\n",
        "O1,S1,2024-01-01 00:00:00\nO2,S2,2024-01-01 00:00:00\nO3,S2,2024-01-01 00:00:00\n",
    );

    run(&workspace, workspace.config()).await.unwrap();

    assert_eq!(
        workspace.read_output("final_slotting_plan.csv"),
        "SKU_ID,Bin_ID\nS2,A03-01\nS1,B05-01\n"
    );
}

#[tokio::test]
async fn test_identical_inputs_produce_identical_plan() {
    let tables = (
        "S3,A,Ambient,1,O3\nS1,B,Ambient,1,O1\nS2,C,Frozen,1,O2\nS4,D,Ambient,60,O4\n",
        "D01-02,D01,Ambient,9\nD01-01,D01,Ambient,9\nF01-01,F01,Frozen,9\n",
        "O1,S4,2024-01-01 00:00:00\n",
    );

    let first = Workspace::new();
    first.write_tables(tables.0, tables.1, tables.2);
    run(&first, first.config()).await.unwrap();

    let second = Workspace::new();
    second.write_tables(tables.0, tables.1, tables.2);
    run(&second, second.config()).await.unwrap();

    for name in [
        "final_slotting_plan.csv",
        "sku_master_corrected.csv",
        "slotting_assignments.json",
        "slotting_summary.json",
    ] {
        assert_eq!(first.read_output(name), second.read_output(name), "{name}");
    }
}

#[tokio::test]
async fn test_shared_fallback_slot_reported_in_strict_mode() {
    let workspace = Workspace::new();
    workspace.write_tables(
        "S1,Fish,Frozen,2,DOCK-1\nS2,Shrimp,Frozen,2,DOCK-1\n",
        "A01-01,A01,Ambient,10\n",
        "",
    );
    let config = TestConfig {
        settings: OptimizerSettings {
            collision_scope: CollisionScope::AllRecords,
            ..Default::default()
        },
        ..workspace.config()
    };

    let result = run(&workspace, config).await.unwrap();

    assert_eq!(result.summary.fallback, 2);
    assert_eq!(result.summary.slot_collisions.len(), 1);
    assert_eq!(result.summary.slot_collisions[0].bin_id, "DOCK-1");
}

#[tokio::test]
async fn test_missing_input_aborts_without_output() {
    let workspace = Workspace::new();
    workspace.write_input(
        "sku_master.csv",
        &format!("{}S1,Peas,Frozen,5,OLD\n", common::SKU_HEADER),
    );

    let err = run(&workspace, workspace.config()).await.unwrap_err();

    assert!(matches!(err, SlottingError::MissingInput { .. }));
    assert!(!workspace.output_exists("final_slotting_plan.csv"));
}

#[tokio::test]
async fn test_schema_error_aborts_without_output() {
    let workspace = Workspace::new();
    workspace.write_tables(
        "S1,Peas,Frozen,five,OLD\n",
        "F01,F01,Frozen,10\n",
        "",
    );

    let err = run(&workspace, workspace.config()).await.unwrap_err();

    match err {
        SlottingError::Schema { file, line, .. } => {
            assert_eq!(file, "sku_master.csv");
            assert_eq!(line, Some(2));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!workspace.output_exists("final_slotting_plan.csv"));
}
