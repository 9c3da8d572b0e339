//! End-to-end generation through the library against fixture documents

use std::fs;
use std::path::Path;
use std::sync::Arc;

use generate_front_api::application::{GenerateApiRequest, GenerateApiUseCase, GenerationSummary};
use generate_front_api::core::{Config, HooksConfig, NamingStrategy};
use generate_front_api::infrastructure::openapi::CompositeOpenApiLoader;
use generate_front_api::infrastructure::output::FileSystemOutputService;
use generate_front_api::infrastructure::{
    CommandHooks, FileSystemTemplateLoader, FormatterPostProcessor, ShellCommandExecutor,
};
use tempfile::TempDir;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/openapi/medical_org.json"
);

fn use_case(workspace: &Path, config: &Config) -> GenerateApiUseCase {
    let executor = Arc::new(ShellCommandExecutor::new());
    GenerateApiUseCase::new(
        Arc::new(CompositeOpenApiLoader::new()),
        Arc::new(FileSystemTemplateLoader::new()),
        Arc::new(FileSystemOutputService::new()),
        Arc::new(FormatterPostProcessor::new(
            config.formatting.command.clone(),
            executor.clone(),
        )),
        Arc::new(CommandHooks::new(config.hooks.clone(), workspace, executor)),
    )
}

async fn run(workspace: &Path, config: Config) -> GenerationSummary {
    use_case(workspace, &config)
        .execute(GenerateApiRequest::new(workspace, config))
        .await
        .expect("generation failed")
}

fn fixture_workspace() -> (TempDir, Config) {
    let workspace = TempDir::new().unwrap();
    fs::copy(FIXTURE, workspace.path().join("openApi.json")).unwrap();

    let mut config = Config::default();
    config.formatting.run_prettier = false;
    (workspace, config)
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path.as_ref())
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.as_ref().display()))
}

#[tokio::test]
async fn test_list_operation_end_to_end() {
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join("openApi.json"),
        r##"{
            "paths": {
                "/system/user/list": {
                    "get": {
                        "tags": ["User"],
                        "summary": "List users",
                        "parameters": [
                            { "name": "userName", "in": "query", "schema": { "type": "string" } }
                        ],
                        "responses": { "200": { "content": { "application/json": { "schema": {
                            "type": "array",
                            "items": { "$ref": "#/components/schemas/SysUserVo" }
                        } } } } }
                    }
                }
            },
            "components": { "schemas": {
                "SysUserVo": {
                    "type": "object",
                    "properties": { "userId": { "type": "string" }, "nickName": { "type": "string" } }
                }
            } }
        }"##,
    )
    .unwrap();

    let mut config = Config::default();
    config.formatting.run_prettier = false;
    config.naming.naming_strategy = NamingStrategy::Tag;

    let summary = run(workspace.path(), config).await;
    assert_eq!(summary.module_count, 1);

    let module_dir = workspace.path().join("src/api/User");
    let types = read(module_dir.join("types.ts"));
    assert!(types.contains("export interface SysUserVo {"));
    assert!(types.contains("export interface ListUserListQuery {\n  userName?: string;\n}"));

    let index = read(module_dir.join("index.ts"));
    let imports: Vec<&str> = index
        .lines()
        .filter(|line| line.ends_with("from './types';"))
        .collect();
    assert_eq!(
        imports,
        vec!["import { SysUserVo, ListUserListQuery } from './types';"]
    );
    assert!(index.contains(
        "export const listUserList = (query?: ListUserListQuery): AxiosPromise<SysUserVo[]> => {"
    ));
    assert_eq!(index.matches("export const").count(), 1);
}

#[tokio::test]
async fn test_fixture_module_files() {
    let (workspace, config) = fixture_workspace();

    let summary = run(workspace.path(), config).await;

    let module_dir = workspace.path().join("src/api/hr/basicManage/medicalOrg");
    assert_eq!(summary.module_count, 1);
    assert_eq!(
        summary.generated_files,
        vec![module_dir.join("types.ts"), module_dir.join("index.ts")]
    );

    let types = read(module_dir.join("types.ts"));
    let declared: Vec<&str> = types
        .lines()
        .filter_map(|line| {
            line.strip_prefix("export interface ")
                .or_else(|| line.strip_prefix("export type "))
                .and_then(|rest| rest.split_whitespace().next())
        })
        .collect();
    assert_eq!(
        declared,
        vec![
            "MedicalOrgBo",
            "OrgStatus",
            "TableDataInfoMedicalOrgVo",
            "MedicalOrgVo",
            "DeptVo",
            "DelBasicManageMedicalOrgQuery",
            "ListMedicalOrgListQuery",
            "ExportMedicalOrgExportRequestData",
            "QueryMedicalOrgTreeResponseItem",
        ]
    );
    assert!(types.contains("export type OrgStatus = string;"));
    assert!(types.contains("  orgIds: (string | number)[];"));
    assert!(types.contains("  children?: QueryMedicalOrgTreeResponseItem[];"));
    assert!(types.contains("  departments?: DeptVo[];"));
    assert!(!types.contains("Unrelated"));
    assert!(!types.contains("RVoid"));

    let index = read(module_dir.join("index.ts"));
    assert!(index.contains(
        "import { MedicalOrgBo, TableDataInfoMedicalOrgVo, MedicalOrgVo, DelBasicManageMedicalOrgQuery, \
         ListMedicalOrgListQuery, ExportMedicalOrgExportRequestData, QueryMedicalOrgTreeResponseItem } from './types';"
    ));
    for signature in [
        "export const updateBasicManageMedicalOrg = (data: MedicalOrgBo): AxiosPromise<void> =>",
        "export const addBasicManageMedicalOrg = (data: MedicalOrgBo): AxiosPromise<string | number> =>",
        "export const delBasicManageMedicalOrg = (params?: DelBasicManageMedicalOrgQuery): AxiosPromise<void> =>",
        "export const listMedicalOrgList = (query?: ListMedicalOrgListQuery): AxiosPromise<TableDataInfoMedicalOrgVo> =>",
        "export const getBasicManageMedicalOrg = (orgId: string | number): AxiosPromise<MedicalOrgVo> =>",
        "export const queryMedicalOrgTree = (): AxiosPromise<QueryMedicalOrgTreeResponseItem[]> =>",
        "export const exportMedicalOrgExport = (data: ExportMedicalOrgExportRequestData): AxiosPromise<Blob> =>",
    ] {
        assert!(index.contains(signature), "missing: {signature}\n{index}");
    }
    assert!(index.contains("url: `/hr/basicManage/medicalOrg/${orgId}`,"));
    assert!(index.contains("method: 'delete',\n    params: params\n"));
}

#[tokio::test]
async fn test_custom_templates_and_config_file() {
    let (workspace, _) = fixture_workspace();
    fs::write(
        workspace.path().join("generate-front-api.config.toml"),
        r#"
[output]
baseDir = "web/services"

[naming]
namingStrategy = "tagMapping"

[naming.tagMapping]
"Medical org" = "hr/org"

[formatting]
runPrettier = false
"#,
    )
    .unwrap();
    fs::create_dir(workspace.path().join("templates")).unwrap();
    fs::write(
        workspace.path().join("templates/api-function.template"),
        "export const {{functionName}} = '{{method}} {{url}}';\n",
    )
    .unwrap();
    fs::write(
        workspace.path().join("templates/index-header.template"),
        "{{#hasTypeImports}}import type { {{typeImports}} } from '{{typeImportPath}}';\n{{/hasTypeImports}}",
    )
    .unwrap();

    let config = generate_front_api::core::load_config(workspace.path(), None)
        .await
        .unwrap();
    run(workspace.path(), config).await;

    let index = read(workspace.path().join("web/services/hr/org/index.ts"));
    assert!(index.starts_with("import type { MedicalOrgBo, "));
    assert!(index.contains("export const listMedicalOrgList = 'get '/hr/basicManage/medicalOrg/list'';\n"));
    assert!(index.contains("export const getBasicManageMedicalOrg = 'get `/hr/basicManage/medicalOrg/${orgId}`';\n"));
}

#[tokio::test]
async fn test_hooks_and_formatter_commands_run_in_workspace() {
    let (workspace, mut config) = fixture_workspace();
    config.formatting.run_prettier = true;
    config.formatting.command = "echo formatted >> format.log; echo".to_string();
    config.hooks = HooksConfig {
        before_generate: Some("echo before > hooks.log".to_string()),
        after_generate: Some(
            "echo \"after $GENERATE_FRONT_API_MODULE_COUNT $GENERATE_FRONT_API_FILE_COUNT\" >> hooks.log"
                .to_string(),
        ),
    };

    let summary = run(workspace.path(), config).await;

    assert_eq!(summary.generated_files.len(), 2);
    assert_eq!(read(workspace.path().join("hooks.log")), "before\nafter 1 2\n");
    assert_eq!(read(workspace.path().join("format.log")), "formatted\n");
}

#[tokio::test]
async fn test_failing_formatter_keeps_files() {
    let (workspace, mut config) = fixture_workspace();
    config.formatting.run_prettier = true;
    config.formatting.command = "exit 1;".to_string();

    let summary = run(workspace.path(), config).await;

    for file in &summary.generated_files {
        assert!(file.exists(), "{} was not written", file.display());
    }
}

#[tokio::test]
async fn test_missing_document_aborts() {
    let workspace = TempDir::new().unwrap();
    let mut config = Config::default();
    config.formatting.run_prettier = false;

    let err = use_case(workspace.path(), &config)
        .execute(GenerateApiRequest::new(workspace.path(), config.clone()))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("OpenAPI file not found"));
    assert!(!workspace.path().join("src/api").exists());
}
