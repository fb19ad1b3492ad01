//! Template file contents
//!
//! Each template starts with a newline so appended fragments are separated
//! from whatever the target file already holds.

/// Import required by generated models
pub const MODEL_IMPORT: &str = "from django.db import models";

/// Import required by generated serializers
pub const SERIALIZER_IMPORT: &str = "from rest_framework import serializers";

/// Import required by generated viewsets
pub const VIEW_IMPORT: &str = "from rest_framework import viewsets";

/// Declaration line for one text field
pub const FIELD_LINE: &str = "    {{name}} = models.CharField(max_length=255, default='')";

/// Class body used when the entity has no fields
pub const EMPTY_FIELDS: &str = "    pass";

/// Attribute used by `__str__` when the entity has no fields
pub const FALLBACK_FIRST_FIELD: &str = "id";

/// Model class
pub const MODEL_TEMPLATE: &str = r"
class {{model_name}}(models.Model):
{{fields}}

    def __str__(self):
        return self.{{first_field}}
";

/// Model serializer
pub const SERIALIZER_TEMPLATE: &str = r"
from {{app_import_path}}.models import {{model_name}}

class {{model_name}}Serializer(serializers.ModelSerializer):
    class Meta:
        model = {{model_name}}
        fields = '__all__'
";

/// Model viewset
pub const VIEWSET_TEMPLATE: &str = r"
from {{app_import_path}}.models import {{model_name}}
from {{app_import_path}}.serializers import {{model_name}}Serializer

class {{model_name}}ViewSet(viewsets.ModelViewSet):
    queryset = {{model_name}}.objects.all()
    serializer_class = {{model_name}}Serializer
";

/// Module route table, replaces the module's `urls.py`
pub const URLS_TEMPLATE: &str = r"
from django.urls import include, path
from rest_framework import routers
from {{app_import_path}}.views import {{model_name}}ViewSet

router = routers.DefaultRouter()
router.register(r'{{model_name_lower}}', {{model_name}}ViewSet)

urlpatterns = [
    path('', include(router.urls)),
]
";

/// Module config class, replaces the module's `apps.py`
pub const APPS_TEMPLATE: &str = r#"
from django.apps import AppConfig

class {{app_class_name}}(AppConfig):
    default_auto_field = "django.db.models.BigAutoField"
    name = "{{app_import_path}}"
"#;

/// Route registration inserted into the global route table
pub const ROUTE_INCLUDE: &str = r#"path("{{app_name}}/", include("{{app_import_path}}.urls"))"#;
