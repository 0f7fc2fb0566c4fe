//! Text and mixed documents against a live collection.

#[cfg(test)]
mod tests {
    use aossctl_client::Operation;

    use crate::{aoss_client, args_for, cleanup_index, run, test_index_name};

    #[tokio::test]
    #[ignore = "requires live collection"]
    async fn test_should_add_and_search_text_documents() {
        let client = aoss_client().await;
        let index = test_index_name("text");
        let args = args_for(&index);

        let created = run(&client, Operation::CreateTextIndex, &args).await;
        assert!(created.contains("\"acknowledged\": true"), "{created}");

        let added = run(&client, Operation::AddTextDoc, &args).await;
        assert!(added.contains("\"result\": \"created\""), "{added}");

        let found = run(&client, Operation::SearchTextDoc, &args).await;
        assert!(found.contains("\"hits\""), "{found}");

        cleanup_index(&client, &index).await;
    }

    #[tokio::test]
    #[ignore = "requires live collection"]
    async fn test_should_add_and_filter_specific_document() {
        let client = aoss_client().await;
        let index = test_index_name("mixed");
        let args = args_for(&index);

        run(&client, Operation::CreateVectorIndex, &args).await;

        let added = run(&client, Operation::AddSpecificDoc, &args).await;
        assert!(added.contains("\"result\": \"created\""), "{added}");

        let found = run(&client, Operation::SearchSpecificDoc, &args).await;
        assert!(found.contains("\"hits\""), "{found}");

        cleanup_index(&client, &index).await;
    }
}
