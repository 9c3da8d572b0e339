//! Output service implementations

pub mod filesystem_output;

pub use filesystem_output::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, OutputService};
    use crate::generation::Artifact;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_filesystem_output_write_artifacts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();

        let artifacts = vec![
            Artifact {
                path: temp_dir.path().join("src/api/hr/org/types.ts"),
                content: "export interface OrgVo {\n}\n".to_string(),
            },
            Artifact {
                path: temp_dir.path().join("src/api/hr/org/index.ts"),
                content: "import request from '@/utils/request';\n".to_string(),
            },
        ];

        output_service.write_artifacts(&artifacts).await.unwrap();

        let types = std::fs::read_to_string(temp_dir.path().join("src/api/hr/org/types.ts"))
            .expect("Failed to read types.ts");
        assert_eq!(types, "export interface OrgVo {\n}\n");
        assert!(temp_dir.path().join("src/api/hr/org/index.ts").exists());
    }

    #[tokio::test]
    async fn test_filesystem_output_overwrites() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        let path = temp_dir.path().join("index.ts");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();

        output_service
            .write_artifacts(&[Artifact {
                path: path.clone(),
                content: "new".to_string(),
            }])
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_filesystem_output_ensure_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();

        let nested_path = temp_dir.path().join("deeply/nested/directory");
        output_service.ensure_directory(&nested_path).await.unwrap();

        assert!(nested_path.is_dir());
    }

    #[tokio::test]
    async fn test_filesystem_output_reports_blocked_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let output_service = FileSystemOutputService::new();
        std::fs::write(temp_dir.path().join("hr"), "a file, not a directory").unwrap();

        let err = output_service
            .write_artifacts(&[Artifact {
                path: temp_dir.path().join("hr/index.ts"),
                content: String::new(),
            }])
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::OutputError(_)));
        assert!(err.to_string().contains("Failed to create directory"));
    }
}
