/* 📖 # Why are the error tests in their own file?

Some of these tests capture span traces, which record source locations.
Keeping them out of error.rs keeps those locations stable while error.rs changes.
*/

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::{CatalogError, CatalogResult, ResultExt};
    use expect_test::expect;
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use tracing::info_span;
    use tracing_error::ErrorLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    /// Install a subscriber with ErrorLayer so span traces are recorded.
    /// `try_init()` tolerates several tests racing to install it.
    fn setup_tracing_subscriber() {
        let _ = tracing_subscriber::registry()
            .with(ErrorLayer::default())
            .try_init();
    }

    fn malformed(index: usize, reason: &str) -> CatalogError {
        CatalogError::new(ErrorKind::MalformedRecord {
            index,
            reason: reason.to_string(),
        })
    }

    #[test]
    fn test_error_from_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let path = PathBuf::from("movies.json");
        let error = CatalogError::new(ErrorKind::FileError {
            path: path.clone(),
            source: io_err,
        });

        match error.kind() {
            ErrorKind::FileError { path: p, .. } => assert_eq!(p, &path),
            _ => panic!("Expected FileError variant"),
        }
        assert_eq!(
            error.source().map(|source| source.to_string()),
            Some("file not found".to_string())
        );
    }

    #[test]
    fn test_malformed_record_display() {
        let error = malformed(3, "missing field `title`");
        expect![[r#"Malformed record at index 3: missing field `title`"#]]
            .assert_eq(&error.to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_pattern_compile_display() {
        let error = CatalogError::new(ErrorKind::PatternCompile {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        });
        expect![[r#"Invalid search pattern '(': unclosed group"#]].assert_eq(&error.to_string());
    }

    #[test]
    fn test_parse_display_with_context() {
        let error = CatalogError::new(ErrorKind::Parse {
            what: "catalog".to_string(),
            reason: "expected a JSON array".to_string(),
        })
        .context("Failed to load catalog from movies.json");
        expect![[r#"Failed to load catalog from movies.json: Failed to parse catalog: expected a JSON array"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = CatalogError::message("root error")
            .context("first")
            .context("second")
            .context("third");
        assert_eq!(error.to_string(), "first: second: third: root error");
        assert_eq!(error.get_context(), ["first", "second", "third"]);
    }

    #[test]
    fn test_error_with_context_lazy_evaluation() {
        let mut called = false;
        let error = CatalogError::message("error").with_context(|| {
            called = true;
            "lazy context".to_string()
        });

        assert!(called);
        assert_eq!(error.get_context()[0], "lazy context");
    }

    #[test]
    fn test_multiple_errors_display() {
        let error = CatalogError::new(ErrorKind::Multiple {
            errors: vec![malformed(0, "bad genres"), malformed(4, "bad title")],
            count: 2,
        });
        expect![[r#"Multiple errors occurred (2 total): Malformed record at index 0: bad genres"#]]
            .assert_eq(&error.to_string());
    }

    #[test]
    fn test_multiple_errors_empty_display() {
        let error = CatalogError::new(ErrorKind::Multiple {
            errors: vec![],
            count: 0,
        });
        assert_eq!(error.to_string(), "Multiple errors occurred (0 total)");
    }

    #[test]
    fn test_error_from_impl() {
        let error: CatalogError = ErrorKind::Message {
            message: "test".to_string(),
        }
        .into();
        match error.kind() {
            ErrorKind::Message { message } => assert_eq!(message, "test"),
            _ => panic!("Expected Message variant"),
        }
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: CatalogResult<i32> = Err(Box::new(CatalogError::message("root")));
        let err = result
            .context("step 1")
            .context("step 2")
            .with_context(|| "step 3".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: step 3: root");
    }

    #[test]
    fn test_result_ext_success_untouched() {
        let result: CatalogResult<i32> = Ok(42);
        assert_eq!(result.context("unused").unwrap(), 42);
    }

    #[test]
    fn test_err_macro() {
        let error = crate::err!("unknown facet '{}'", "mood");
        assert_eq!(error.to_string(), "unknown facet 'mood'");
    }

    #[test]
    fn test_bail_macro() {
        fn check(value: usize) -> CatalogResult<usize> {
            if value > 2 {
                crate::bail!("value {} too large", value);
            }
            Ok(value)
        }
        assert_eq!(check(1).unwrap(), 1);
        assert_eq!(check(5).unwrap_err().to_string(), "value 5 too large");
    }

    #[test]
    fn test_span_trace_captured() {
        setup_tracing_subscriber();
        let span = info_span!("load_catalog_span");
        let _guard = span.enter();
        let error = malformed(1, "bad");
        let trace = error.span_trace().to_string();
        assert!(
            trace.contains("load_catalog_span"),
            "span trace should mention the active span: {trace}"
        );
    }
}
