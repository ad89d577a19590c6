/*!
 * End-to-end conversion tests through mock office managers
 */

use bytes::Bytes;
use futures::future::join_all;
use serde_json::json;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use onlineconv::errors::{ConversionError, OfficeError};
use onlineconv::office::mock::MockOfficeManager;
use onlineconv::{DocumentFormat, FormatRegistry, OnlineConverter, SourceDocumentSpecs, TargetDocumentSpecs};
use crate::common::{create_temp_dir, create_test_file, init_logging, stock_format};

#[tokio::test]
async fn test_execute_shouldSendExactlyOneTaskWithTheGivenSpecs() {
    init_logging();
    let manager = MockOfficeManager::working();
    let converter = OnlineConverter::builder()
        .office_manager(Arc::new(manager.clone()))
        .build()
        .unwrap();
    let source = SourceDocumentSpecs::from_bytes(b"spec a".to_vec()).with_format(stock_format("docx"));
    let (target, _document) = TargetDocumentSpecs::in_memory();
    let target = target.with_format(stock_format("pdf"));

    converter
        .convert(source.clone())
        .to(target.clone())
        .execute()
        .await
        .unwrap();

    assert_eq!(manager.execute_count(), 1);
    let task = manager.last_task().unwrap();
    assert_eq!(task.source(), &source);
    assert_eq!(task.target(), &target);
}

#[tokio::test]
async fn test_execute_fileToFile_shouldWriteTargetFile() -> anyhow::Result<()> {
    init_logging();
    let dir = create_temp_dir()?;
    let input = create_test_file(dir.path(), "letter.odt", b"odt content")?;
    let output = dir.path().join("out").join("letter.pdf");
    let manager = MockOfficeManager::working();
    let converter = OnlineConverter::make_with(Arc::new(manager.clone()));

    converter.convert(input.as_path()).to(output.as_path()).execute().await?;

    assert_eq!(std::fs::read(&output)?, b"odt content");
    let task = manager.last_task().unwrap();
    assert_eq!(task.source_format().map(|f| f.extension()), Some("odt"));
    assert_eq!(task.target_format().map(|f| f.extension()), Some("pdf"));
    assert_eq!(task.store_properties().get("FilterName"), Some(&json!("writer_pdf_Export")));
    assert_eq!(task.load_properties().get("Hidden"), Some(&json!(true)));
    Ok(())
}

#[tokio::test]
async fn test_execute_inMemory_shouldReturnConvertedArtifact() {
    let manager = MockOfficeManager::working()
        .with_custom_output(|task, content| {
            let extension = task.target_format().map_or("?", |f| f.extension());
            Bytes::from(format!("{}:{}", extension, content.len()))
        });
    let converter = OnlineConverter::make_with(Arc::new(manager));
    let (target, document) = TargetDocumentSpecs::in_memory();

    converter
        .convert(b"a,b,c\n1,2,3\n".to_vec())
        .as_format(stock_format("csv"))
        .to(target)
        .as_format(stock_format("xlsx"))
        .execute()
        .await
        .unwrap();

    assert_eq!(document.take(), Some(Bytes::from_static(b"xlsx:12")));
}

#[tokio::test]
async fn test_execute_withFailingManager_shouldPropagateOfficeErrorUnchanged() {
    let manager = MockOfficeManager::failing();
    let converter = OnlineConverter::make_with(Arc::new(manager.clone()));
    let (target, document) = TargetDocumentSpecs::in_memory();

    let result = converter
        .convert(SourceDocumentSpecs::from_bytes(b"x".to_vec()).with_format(stock_format("pptx")))
        .to(target.with_format(stock_format("pdf")))
        .execute()
        .await;

    assert_eq!(
        result,
        Err(ConversionError::Office(OfficeError::ServiceError {
            status_code: 500,
            message: "Simulated office failure".to_string(),
        }))
    );
    assert_eq!(manager.execute_count(), 1);
    assert!(document.get().is_none());
}

#[tokio::test]
async fn test_execute_withIntermittentManager_shouldNotRetry() {
    let manager = MockOfficeManager::intermittent(2);
    let converter = OnlineConverter::make_with(Arc::new(manager.clone()));

    let mut outcomes = Vec::new();
    for _ in 0..4 {
        let (target, _) = TargetDocumentSpecs::in_memory();
        let result = converter
            .convert(SourceDocumentSpecs::from_bytes(b"x".to_vec()).with_format(stock_format("txt")))
            .to(target.with_format(stock_format("odt")))
            .execute()
            .await;
        outcomes.push(result.is_ok());
    }

    assert_eq!(outcomes, vec![true, false, true, false]);
    assert_eq!(manager.execute_count(), 4);
}

#[tokio::test]
async fn test_execute_sameSpecsTwice_shouldBuildFreshTasks() {
    let manager = MockOfficeManager::working();
    let converter = OnlineConverter::make_with(Arc::new(manager.clone()));
    let source = SourceDocumentSpecs::from_bytes(b"x".to_vec()).with_format(stock_format("ods"));

    for _ in 0..2 {
        let (target, _) = TargetDocumentSpecs::in_memory();
        converter
            .convert(source.clone())
            .to(target.with_format(stock_format("pdf")))
            .execute()
            .await
            .unwrap();
    }

    let tasks = manager.tasks();
    assert_eq!(tasks.len(), 2);
    assert_ne!(tasks[0].id(), tasks[1].id());
    assert_eq!(tasks[0].source(), tasks[1].source());
}

#[tokio::test]
async fn test_converter_sharedAcrossTasks_shouldRunConcurrently() {
    let manager = MockOfficeManager::slow(20);
    let converter = OnlineConverter::make_with(Arc::new(manager.clone()));

    let jobs = (0..8).map(|i| {
        let converter = converter.clone();
        tokio::spawn(async move {
            let (target, document) = TargetDocumentSpecs::in_memory();
            converter
                .convert(SourceDocumentSpecs::from_bytes(format!("doc {}", i).into_bytes()).with_format(stock_format("doc")))
                .to(target.with_format(stock_format("docx")))
                .execute()
                .await
                .map(|_| document.take())
        })
    });
    let results = join_all(jobs).await;

    for (i, result) in results.into_iter().enumerate() {
        let content = result.expect("task should not panic").expect("conversion should succeed");
        assert_eq!(content, Some(Bytes::from(format!("doc {}", i))));
    }
    let ids: HashSet<_> = manager.tasks().iter().map(|t| t.id()).collect();
    assert_eq!(ids.len(), 8);
}

#[tokio::test]
async fn test_execute_withoutOverwrite_shouldFailOnExistingTarget() -> anyhow::Result<()> {
    let dir = create_temp_dir()?;
    let input = create_test_file(dir.path(), "sheet.xlsx", b"new")?;
    let output = create_test_file(dir.path(), "sheet.ods", b"old")?;
    let converter = OnlineConverter::make_with(Arc::new(MockOfficeManager::working()));

    let result = converter
        .convert(input.as_path())
        .to(TargetDocumentSpecs::to_file(&output).allow_overwrite(false))
        .execute()
        .await;

    assert!(matches!(result, Err(ConversionError::Office(OfficeError::Io(_)))));
    assert_eq!(std::fs::read(&output)?, b"old");
    Ok(())
}

#[tokio::test]
async fn test_execute_withUnregisteredExport_shouldLeaveDecisionToManager() {
    let manager = MockOfficeManager::working();
    let converter = OnlineConverter::make_with(Arc::new(manager.clone()));
    let (target, document) = TargetDocumentSpecs::in_memory();

    converter
        .convert(SourceDocumentSpecs::from_bytes(b"png".to_vec()).with_format(stock_format("png")))
        .to(target.with_format(stock_format("pdf")))
        .execute()
        .await
        .unwrap();

    assert_eq!(manager.execute_count(), 1);
    assert_eq!(document.take(), Some(Bytes::from_static(b"png")));
}

#[tokio::test]
async fn test_execute_withManagerRejectingUnregisteredExport_shouldReturnItsError() {
    let manager = MockOfficeManager::failing();
    let registry = FormatRegistry::default()
        .with_format(DocumentFormat::builder("Markdown", "md", "text/markdown").build());
    let converter = OnlineConverter::builder()
        .office_manager(Arc::new(manager.clone()))
        .format_registry(registry)
        .build()
        .unwrap();

    let result = converter
        .convert(PathBuf::from("notes.docx"))
        .to(PathBuf::from("notes.md"))
        .execute()
        .await;

    assert_eq!(
        result,
        Err(ConversionError::Office(OfficeError::ServiceError {
            status_code: 500,
            message: "Simulated office failure".to_string(),
        }))
    );
    assert_eq!(manager.execute_count(), 1);
    let task = manager.last_task().unwrap();
    assert_eq!(task.target_format().map(|f| f.extension()), Some("md"));
    assert!(task.store_properties().is_empty());
}

#[test]
fn test_execute_fromBlockingContext_shouldComplete() {
    let manager = MockOfficeManager::working();
    let converter = OnlineConverter::make_with(Arc::new(manager.clone()));
    let (target, document) = TargetDocumentSpecs::in_memory();

    let job = converter
        .convert(SourceDocumentSpecs::from_bytes(b"rtf".to_vec()).with_format(stock_format("rtf")))
        .to(target.with_format(stock_format("txt")));
    tokio_test::block_on(job.execute()).unwrap();

    assert_eq!(document.len(), 3);
    assert_eq!(manager.execute_count(), 1);
}
