//! Typed records describing a service and its methods.

use apigen_collections::Vector;

use crate::casing::{to_snake_case, to_upper_camel};
use crate::types::PhpType;

/// The value shape of a request field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Text,
    /// Message-typed field; carries the message short name.
    Message(String),
}

impl FieldKind {
    /// The type name used in documentation tags.
    pub fn doc_type(&self) -> String {
        match self {
            FieldKind::Bool => "bool".to_string(),
            FieldKind::Int => "int".to_string(),
            FieldKind::Text => "string".to_string(),
            FieldKind::Message(name) => name.clone(),
        }
    }
}

/// One request field of one method.
#[derive(Clone, Debug)]
pub struct FieldDetails {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub doc_lines: Vector<String>,
    /// Request setter method name, derived `set` + UpperCamel.
    pub setter: String,
}

impl FieldDetails {
    pub fn new(
        name: impl Into<String>,
        kind: FieldKind,
        required: bool,
        doc_lines: Vector<String>,
    ) -> FieldDetails {
        let name = name.into();
        let setter = format!("set{}", to_upper_camel(&name));
        FieldDetails {
            name,
            kind,
            required,
            doc_lines,
            setter,
        }
    }
}

/// One RPC method of one service.
#[derive(Clone, Debug)]
pub struct MethodDetails {
    /// Generated client method name, lowerCamel.
    pub name: String,
    pub request_type: PhpType,
    pub response_type: PhpType,
    pub doc_lines: Vector<String>,
    pub required_fields: Vector<FieldDetails>,
    pub optional_fields: Vector<FieldDetails>,
}

/// One service, fully resolved for generation.
#[derive(Clone, Debug)]
pub struct ServiceDetails {
    /// Short service name, e.g. `Echo`.
    pub service_name: String,
    /// Fully qualified protobuf service name, e.g. `example.echo.v1.Echo`.
    pub full_name: String,
    pub client_class_name: String,
    pub client_namespace: String,
    pub default_host: Option<String>,
    pub default_port: u16,
    pub default_scopes: Option<Vector<String>>,
    pub doc_lines: Vector<String>,
    pub methods: Vector<MethodDetails>,
}

impl ServiceDetails {
    pub fn client_config_filename(&self) -> String {
        format!("{}_client_config.json", to_snake_case(&self.service_name))
    }

    pub fn descriptor_config_filename(&self) -> String {
        format!("{}_descriptor_config.php", to_snake_case(&self.service_name))
    }

    pub fn grpc_config_filename(&self) -> String {
        format!("{}_grpc_config.json", to_snake_case(&self.service_name))
    }

    pub fn rest_config_filename(&self) -> String {
        format!("{}_rest_client_config.php", to_snake_case(&self.service_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn setter_name_derives_from_field_name() {
        let field = FieldDetails::new("page_size", FieldKind::Int, false, Vector::new());
        assert_eq!(field.setter, "setPageSize");
    }

    #[test]
    fn doc_types_per_kind() {
        assert_eq!(FieldKind::Bool.doc_type(), "bool");
        assert_eq!(FieldKind::Int.doc_type(), "int");
        assert_eq!(FieldKind::Text.doc_type(), "string");
        assert_eq!(FieldKind::Message("Operation".to_string()).doc_type(), "Operation");
    }

    #[test]
    fn config_filenames_are_snake_cased() {
        let service = ServiceDetails {
            service_name: "BigQueryRead".to_string(),
            full_name: "example.bq.v1.BigQueryRead".to_string(),
            client_class_name: "BigQueryReadGapicClient".to_string(),
            client_namespace: "Example\\Bq\\V1\\Gapic".to_string(),
            default_host: None,
            default_port: 443,
            default_scopes: None,
            doc_lines: Vector::new(),
            methods: Vector::new(),
        };
        assert_eq!(
            service.client_config_filename(),
            "big_query_read_client_config.json"
        );
        assert_eq!(
            service.descriptor_config_filename(),
            "big_query_read_descriptor_config.php"
        );
        assert_eq!(
            service.grpc_config_filename(),
            "big_query_read_grpc_config.json"
        );
        assert_eq!(
            service.rest_config_filename(),
            "big_query_read_rest_client_config.php"
        );
    }
}
