mod common;

use common::Workspace;
use slotting_optimizer::core::ConfigProvider;
use slotting_optimizer::utils::validation::Validate;
use slotting_optimizer::{CsvSlottingPipeline, LocalStorage, SlottingEngine, TomlConfig};

#[tokio::test]
async fn test_toml_config_drives_custom_scores_and_filenames() {
    let workspace = Workspace::new();
    workspace.write_tables(
        "S1,Tools,Ambient,1,OLD-1\nS2,Paint,Ambient,1,OLD-2\n",
        "A01-01,A01,Ambient,10\nZ01-01,Z01,Ambient,10\n",
        "O1,S1,2024-06-01T10:00:00\n",
    );

    let toml_content = format!(
        r#"
[run]
name = "aisle-z-trial"

[inputs]
base_path = "{}"
sku_master = "sku_master.csv"
warehouse_constraints = "warehouse_constraints.csv"
order_transactions = "order_transactions.csv"

[optimizer.aisle_scores]
A = 10
Z = 100

[output]
output_path = "{}"

[output.filenames]
plan = "trial_plan.csv"
"#,
        workspace.input_dir().replace('\\', "/"),
        workspace.output_dir().replace('\\', "/")
    );

    let config = TomlConfig::from_toml_str(&toml_content).unwrap();
    config.validate().unwrap();

    let input = LocalStorage::new(config.input_path().to_string());
    let output = LocalStorage::new(config.output_path().to_string());
    let engine = SlottingEngine::new(CsvSlottingPipeline::new(input, output, config));

    let result = engine.run().await.unwrap();

    assert!(result.output_path.ends_with("trial_plan.csv"));
    assert_eq!(
        workspace.read_output("trial_plan.csv"),
        "SKU_ID,Bin_ID\nS1,Z01-01\nS2,A01-01\n"
    );
    assert!(workspace.output_exists("slotting_summary.json"));
}
