//! Vector index lifecycle against a live collection.

#[cfg(test)]
mod tests {
    use aossctl_client::{Operation, OperationArgs};

    use crate::{aoss_client, args_for, cleanup_index, run, test_index_name};

    #[tokio::test]
    #[ignore = "requires live collection"]
    async fn test_should_create_vector_index_with_dimension() {
        let client = aoss_client().await;
        let index = test_index_name("vec");
        let args = OperationArgs {
            dimension: 8,
            ..args_for(&index)
        };

        let created = run(&client, Operation::CreateVectorIndex, &args).await;
        assert!(created.contains("\"acknowledged\": true"), "{created}");

        let settings = run(&client, Operation::GetIndexSettings, &args).await;
        assert!(settings.contains("Settings:"));
        assert!(settings.contains("Mappings:"));
        assert!(settings.contains("\"dimension\": 8"));

        cleanup_index(&client, &index).await;
    }

    #[tokio::test]
    #[ignore = "requires live collection"]
    async fn test_should_bulk_ingest_and_search_vectors() {
        let client = aoss_client().await;
        let index = test_index_name("bulk");
        let args = OperationArgs {
            dimension: 2,
            num_docs: 10,
            ..args_for(&index)
        };

        run(&client, Operation::CreateVectorIndex, &args).await;

        let bulk = run(&client, Operation::BulkIngestVectors, &args).await;
        let bulk: serde_json::Value = serde_json::from_str(&bulk).unwrap();
        assert_eq!(bulk["errors"], false);
        assert_eq!(bulk["items"].as_array().unwrap().len(), 10);

        let single = run(&client, Operation::IngestVectorDoc, &args).await;
        assert!(single.contains("\"result\": \"created\""), "{single}");

        let search = run(&client, Operation::SearchVectorDoc, &args).await;
        assert!(search.contains("\"hits\""), "{search}");

        cleanup_index(&client, &index).await;
    }
}
