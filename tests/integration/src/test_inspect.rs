//! Listing, health and deletion against a live collection.

#[cfg(test)]
mod tests {
    use aossctl_client::{Operation, OperationArgs};

    use crate::{aoss_client, args_for, cleanup_index, run, test_index_name};

    #[tokio::test]
    #[ignore = "requires live collection"]
    async fn test_should_list_created_index() {
        let client = aoss_client().await;
        let index = test_index_name("list");
        let args = args_for(&index);

        run(&client, Operation::CreateTextIndex, &args).await;

        let listed = run(&client, Operation::ListIndices, &OperationArgs::default()).await;
        assert!(listed.starts_with("\nIndices:"), "{listed}");
        assert!(listed.contains(index.as_str()));

        let health = run(&client, Operation::GetIndexHealth, &args).await;
        assert!(health.contains("\"docs.count\""), "{health}");

        cleanup_index(&client, &index).await;
    }

    #[tokio::test]
    #[ignore = "requires live collection"]
    async fn test_should_page_and_delete_documents() {
        let client = aoss_client().await;
        let index = test_index_name("docs");
        let args = OperationArgs {
            num_docs: 3,
            ..args_for(&index)
        };

        run(&client, Operation::CreateVectorIndex, &args).await;
        run(&client, Operation::BulkIngestVectors, &args).await;

        let listed = run(&client, Operation::GetAllDocuments, &args).await;
        assert!(listed.contains(&format!("Total documents in index '{index}'")), "{listed}");

        let deleted = run(&client, Operation::DeleteDocuments, &args).await;
        assert!(!deleted.is_empty());

        cleanup_index(&client, &index).await;
    }
}
