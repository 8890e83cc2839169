//! JSON service-manifest input.
//!
//! The manifest is the generator's only configuration document. It is
//! deserialized as-is and then validated while converting into the typed
//! detail records; nothing downstream sees an unvalidated value.

use apigen_collections::{Set, Vector};
use serde::Deserialize;

use crate::casing::to_lower_camel;
use crate::details::{FieldDetails, FieldKind, MethodDetails, ServiceDetails};
use crate::error::ModelError;
use crate::types::PhpType;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceManifest {
    /// Protobuf package, e.g. `example.echo.v1`.
    pub package: String,
    /// PHP namespace for generated message types, e.g. `Example\Echo\V1`.
    pub namespace: String,
    services: Vec<ManifestService>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestService {
    name: String,
    #[serde(default)]
    host: Option<String>,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    scopes: Option<Vec<String>>,
    #[serde(default)]
    description: Vec<String>,
    #[serde(default)]
    methods: Vec<ManifestMethod>,
}

fn default_port() -> u16 {
    443
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestMethod {
    name: String,
    request: String,
    response: String,
    #[serde(default)]
    description: Vec<String>,
    #[serde(default)]
    fields: Vec<ManifestField>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestField {
    name: String,
    kind: String,
    #[serde(default)]
    message_type: Option<String>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    description: Vec<String>,
}

impl ServiceManifest {
    /// Validate and convert every declared service.
    pub fn to_services(&self) -> Result<Vector<ServiceDetails>, ModelError> {
        if self.services.is_empty() {
            return Err(ModelError::NoServices);
        }
        let mut out = Vector::new();
        for service in &self.services {
            out = out.append(self.convert_service(service)?);
        }
        Ok(out)
    }

    fn convert_service(&self, service: &ManifestService) -> Result<ServiceDetails, ModelError> {
        let mut seen = Set::new();
        let mut methods = Vector::new();
        for method in &service.methods {
            if seen.contains(&method.name) {
                return Err(ModelError::DuplicateMethod {
                    service: service.name.clone(),
                    method: method.name.clone(),
                });
            }
            seen = seen.add(method.name.clone());
            methods = methods.append(self.convert_method(method)?);
        }
        tracing::debug!(
            service = %service.name,
            methods = methods.len(),
            "resolved service metadata"
        );
        Ok(ServiceDetails {
            service_name: service.name.clone(),
            full_name: format!("{}.{}", self.package, service.name),
            client_class_name: format!("{}GapicClient", service.name),
            client_namespace: format!("{}\\Gapic", self.namespace),
            default_host: service.host.clone(),
            default_port: service.port,
            default_scopes: service.scopes.clone().map(Vector::from),
            doc_lines: service.description.clone().into(),
            methods,
        })
    }

    fn convert_method(&self, method: &ManifestMethod) -> Result<MethodDetails, ModelError> {
        let mut required = Vector::new();
        let mut optional = Vector::new();
        for field in &method.fields {
            let details = convert_field(field)?;
            if details.required {
                required = required.append(details);
            } else {
                optional = optional.append(details);
            }
        }
        Ok(MethodDetails {
            name: to_lower_camel(&method.name),
            request_type: PhpType::in_namespace(&self.namespace, method.request.clone()),
            response_type: PhpType::in_namespace(&self.namespace, method.response.clone()),
            doc_lines: method.description.clone().into(),
            required_fields: required,
            optional_fields: optional,
        })
    }
}

fn convert_field(field: &ManifestField) -> Result<FieldDetails, ModelError> {
    let kind = match field.kind.as_str() {
        "bool" => FieldKind::Bool,
        "int" => FieldKind::Int,
        "text" => FieldKind::Text,
        "message" => match &field.message_type {
            Some(name) => FieldKind::Message(name.clone()),
            None => {
                return Err(ModelError::MessageFieldWithoutType {
                    field: field.name.clone(),
                })
            }
        },
        other => {
            return Err(ModelError::UnknownFieldKind {
                field: field.name.clone(),
                kind: other.to_string(),
            })
        }
    };
    Ok(FieldDetails::new(
        field.name.clone(),
        kind,
        field.required,
        field.description.clone().into(),
    ))
}
