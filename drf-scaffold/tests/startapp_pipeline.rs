//! End-to-end tests for the startapp pipeline against temporary projects

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use drf_scaffold::commands::{EntityArgs, StartAppCommand};
use drf_scaffold::scaffold::{collect_entity, ScriptedSource, SharedFileKind};
use drf_scaffold::{ModuleDescriptor, Placement, ScaffoldConfig, ScaffoldError, ScaffoldPlan};
use tempfile::TempDir;
use walkdir::WalkDir;

const CORE_URLS: &str = r#"from django.contrib import admin
from django.urls import include, path

urlpatterns = [
    path("admin/", admin.site.urls),
]
"#;

const BASE_SETTINGS: &str = r#"THIRD_PARTY_APPS = [
    "rest_framework",
]

LOCAL_APPS = [
    "core"]

INSTALLED_APPS = [*LOCAL_APPS, *THIRD_PARTY_APPS]
"#;

/// Minimal Django project with an app template and the two shared files
fn django_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let template = root.join("app_template");
    fs::create_dir_all(template.join("migrations")).unwrap();
    fs::write(template.join("__init__.py"), "").unwrap();
    fs::write(template.join("admin.py"), "from django.contrib import admin\n").unwrap();
    fs::write(template.join("apps.py"), "# replaced on creation\n").unwrap();
    fs::write(template.join("models.py"), "from django.db import models\n").unwrap();
    fs::write(template.join("tests.py"), "# tests\n").unwrap();
    fs::write(template.join("migrations").join("__init__.py"), "").unwrap();

    fs::create_dir_all(root.join("core").join("settings")).unwrap();
    fs::write(root.join("core").join("urls.py"), CORE_URLS).unwrap();
    fs::write(root.join("core").join("settings").join("base.py"), BASE_SETTINGS).unwrap();

    temp_dir
}

/// Relative path -> content for every file under `dir`
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    WalkDir::new(dir)
        .into_iter()
        .map(Result::unwrap)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(dir).unwrap().to_path_buf();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn startapp(root: &Path, name: &str, nested: bool, entity: EntityArgs) -> anyhow::Result<()> {
    StartAppCommand::new(name.to_string(), nested, root.to_path_buf(), entity, false).execute()
}

fn declined() -> EntityArgs {
    EntityArgs {
        no_entity: true,
        ..EntityArgs::default()
    }
}

fn with_entity(entity: &str, fields: &[&str]) -> EntityArgs {
    EntityArgs {
        entity: Some(entity.to_string()),
        fields: fields.iter().map(ToString::to_string).collect(),
        no_entity: false,
    }
}

#[test]
fn test_declined_entity_copies_template_and_registers_app() {
    let project = django_project();
    let root = project.path();
    let template = snapshot(&root.join("app_template"));

    startapp(root, "blog", false, declined()).unwrap();

    let created = snapshot(&root.join("blog"));
    assert_eq!(
        created.keys().collect::<Vec<_>>(),
        template.keys().collect::<Vec<_>>()
    );
    for (path, content) in &template {
        if path != Path::new("apps.py") {
            assert_eq!(&created[path], content, "{} differs from template", path.display());
        }
    }

    let apps = read(root, "blog/apps.py");
    assert!(apps.contains("class BlogConfig(AppConfig):"));
    assert!(apps.contains("name = \"blog\""));

    let urls = read(root, "core/urls.py");
    assert_eq!(urls.matches(r#"path("blog/", include("blog.urls"))"#).count(), 1);
    assert!(urls.contains("urlpatterns = [\n    path(\"blog/\", include(\"blog.urls\")),\n"));

    let settings = read(root, "core/settings/base.py");
    assert_eq!(settings.matches("\"blog\"").count(), 1);
    assert!(settings.contains("LOCAL_APPS = [\n    \"blog\",\n    \"core\"]"));
}

#[test]
fn test_entity_generates_model_serializer_viewset_and_routes() {
    let project = django_project();
    let root = project.path();

    startapp(root, "blog", false, with_entity("post", &["title", "body"])).unwrap();

    let models = read(root, "blog/models.py");
    assert_eq!(models.matches("from django.db import models").count(), 1);
    assert!(models.contains("class Post(models.Model):"));
    assert_eq!(models.matches("models.CharField(max_length=255, default='')").count(), 2);
    assert!(models.find("    title = ").unwrap() < models.find("    body = ").unwrap());
    assert!(models.contains("return self.title"));

    let serializers = read(root, "blog/serializers.py");
    assert!(serializers.contains("from rest_framework import serializers"));
    assert!(serializers.contains("from blog.models import Post"));
    assert!(serializers.contains("class PostSerializer(serializers.ModelSerializer):"));

    let views = read(root, "blog/views.py");
    assert!(views.contains("from rest_framework import viewsets"));
    assert!(views.contains("from blog.serializers import PostSerializer"));
    assert!(views.contains("class PostViewSet(viewsets.ModelViewSet):"));

    let urls = read(root, "blog/urls.py");
    assert!(urls.contains("from blog.views import PostViewSet"));
    assert!(urls.contains("router.register(r'post', PostViewSet)"));
}

#[test]
fn test_entity_without_fields_uses_fallback() {
    let project = django_project();
    let root = project.path();

    startapp(root, "blog", false, with_entity("post", &[])).unwrap();

    let models = read(root, "blog/models.py");
    assert!(models.contains("class Post(models.Model):\n    pass\n"));
    assert!(models.contains("return self.id"));
}

#[test]
fn test_existing_destination_is_left_alone() {
    let project = django_project();
    let root = project.path();
    fs::create_dir(root.join("blog")).unwrap();
    fs::write(root.join("blog").join("models.py"), "# hand written\n").unwrap();
    let before = snapshot(root);

    startapp(root, "blog", false, with_entity("post", &["title"])).unwrap();

    assert_eq!(snapshot(root), before);
}

#[test]
fn test_shared_file_edits_are_idempotent() {
    let project = django_project();
    let root = project.path();

    startapp(root, "blog", false, declined()).unwrap();
    let urls_once = read(root, "core/urls.py");
    let settings_once = read(root, "core/settings/base.py");

    // Remove the app and run again: the shared files already reference it
    fs::remove_dir_all(root.join("blog")).unwrap();
    startapp(root, "blog", false, declined()).unwrap();

    assert_eq!(read(root, "core/urls.py"), urls_once);
    assert_eq!(read(root, "core/settings/base.py"), settings_once);
}

#[test]
fn test_nested_placement() {
    let project = django_project();
    let root = project.path();

    startapp(root, "shop", true, with_entity("order item", &["sku"])).unwrap();

    assert!(root.join("src/shop/models.py").is_file());
    let apps = read(root, "src/shop/apps.py");
    assert!(apps.contains("class ShopConfig(AppConfig):"));
    assert!(apps.contains("name = \"src.shop\""));

    let views = read(root, "src/shop/views.py");
    assert!(views.contains("from src.shop.models import OrderItem"));

    assert!(read(root, "core/urls.py").contains(r#"path("shop/", include("src.shop.urls"))"#));
    assert!(read(root, "core/settings/base.py").contains("\"src.shop\","));
}

#[test]
fn test_shared_files_without_markers() {
    let project = django_project();
    let root = project.path();
    fs::write(root.join("core/urls.py"), "from django.contrib import admin\n").unwrap();
    fs::write(root.join("core/settings/base.py"), "DEBUG = True\n").unwrap();

    startapp(root, "blog", false, declined()).unwrap();

    assert_eq!(
        read(root, "core/urls.py"),
        "from django.urls import include, path\nfrom django.contrib import admin\n\nurlpatterns = [\n    path(\"blog/\", include(\"blog.urls\")),\n]\n"
    );
    assert_eq!(
        read(root, "core/settings/base.py"),
        "DEBUG = True\n\nLOCAL_APPS = [\n    \"blog\",]\n"
    );
}

#[test]
fn test_missing_template_fails_without_writing() {
    let project = django_project();
    let root = project.path();
    fs::remove_dir_all(root.join("app_template")).unwrap();
    let before = snapshot(root);

    let result = startapp(root, "blog", false, declined());

    assert!(result.is_err());
    assert_eq!(snapshot(root), before);
}

#[test]
fn test_dry_run_writes_nothing() {
    let project = django_project();
    let root = project.path();
    let before = snapshot(root);

    StartAppCommand::new(
        "blog".to_string(),
        false,
        root.to_path_buf(),
        with_entity("post", &["title"]),
        true,
    )
    .execute()
    .unwrap();

    assert_eq!(snapshot(root), before);
}

#[test]
fn test_config_file_redirects_shared_files() {
    let project = django_project();
    let root = project.path();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::write(root.join("config/routes.py"), "urlpatterns = [\n]\n").unwrap();
    fs::write(root.join("config/apps.py"), "PROJECT_APPS = [\n]\n").unwrap();
    fs::write(
        root.join("scaffold.toml"),
        "[routes]\nfile = \"config/routes.py\"\n\n[registry]\nfile = \"config/apps.py\"\nlist_name = \"PROJECT_APPS\"\n",
    )
    .unwrap();

    startapp(root, "blog", false, declined()).unwrap();

    assert!(read(root, "config/routes.py").contains(r#"path("blog/", include("blog.urls"))"#));
    assert_eq!(read(root, "config/apps.py"), "PROJECT_APPS = [\n    \"blog\",\n]\n");
    // Default shared files untouched
    assert_eq!(read(root, "core/urls.py"), CORE_URLS);
    assert_eq!(read(root, "core/settings/base.py"), BASE_SETTINGS);
}

#[test]
fn test_plan_from_scripted_source() {
    let project = django_project();
    let root = project.path();
    let config = ScaffoldConfig::default();

    let module = ModuleDescriptor::derive(root, "blog", Placement::Standard, &config.source_root)
        .unwrap();
    let mut source = ScriptedSource::entity("post", ["title", "body"]);
    let entity = collect_entity(&mut source).unwrap();

    let plan = ScaffoldPlan::build(root, &config, module, entity).unwrap();
    let routes = plan.shared_file(SharedFileKind::RouteTable).unwrap();
    assert!(routes.is_changed());
    assert_eq!(plan.entity().map(|e| e.name()), Some("Post"));

    // Building again on top of the planned content adds nothing new
    fs::write(root.join("core/urls.py"), &routes.content).unwrap();
    let module = ModuleDescriptor::derive(root, "blog", Placement::Standard, &config.source_root)
        .unwrap();
    let replanned = ScaffoldPlan::build(root, &config, module, None).unwrap();
    assert!(!replanned.shared_file(SharedFileKind::RouteTable).unwrap().is_changed());
}

#[test]
fn test_plan_rejects_existing_destination() {
    let project = django_project();
    let root = project.path();
    fs::create_dir(root.join("blog")).unwrap();

    let module =
        ModuleDescriptor::derive(root, "blog", Placement::Standard, "src").unwrap();
    let result = ScaffoldPlan::build(root, &ScaffoldConfig::default(), module, None);

    assert!(matches!(result, Err(ScaffoldError::DestinationExists { .. })));
}
