//! Client class assembly.

use apigen_ast::{ArrayLit, Block, Expr, If, Stmt, StmtTree, Try};
use apigen_collections::Vector;
use apigen_doc::{Doc, DocTree, Fragment, Reformatter};
use apigen_model::{
    to_lower_camel, to_upper_camel, FieldKind, MethodDetails, PhpType, ServiceDetails,
    SourceFileContext,
};
use apigen_php::{ClassDef, Constant, Method, Param, Property, Visibility};

use crate::GenerateError;

/// Generate the complete client file for one service: `<?php` header,
/// namespace, imports, and the client class.
pub fn generate_client(
    ctx: &mut SourceFileContext,
    service: &ServiceDetails,
    fmt: &dyn Reformatter,
) -> Result<String, GenerateError> {
    tracing::debug!(class = %service.client_class_name, "assembling client class");

    let trait_name = ctx
        .resolve(&PhpType::from_name("Google\\ApiCore\\GapicClientTrait"))
        .to_string();
    let message_ns = message_namespace(service);

    let mut class = ClassDef::new(service.client_class_name.clone())
        .uses_trait(trait_name)
        .doc(class_doc(ctx, service, &message_ns))
        .member(
            Constant::new("SERVICE_NAME", Expr::str(service.full_name.clone()))
                .doc(Doc::words("The name of the service.")),
        );

    if let Some(host) = &service.default_host {
        class = class.member(
            Constant::new("SERVICE_ADDRESS", Expr::str(host.clone()))
                .doc(Doc::words("The default address of the service.")),
        );
    }

    class = class
        .member(
            Constant::new("DEFAULT_SERVICE_PORT", Expr::int(i64::from(service.default_port)))
                .doc(Doc::words("The default port of the service.")),
        )
        .member(
            Constant::new("CODEGEN_NAME", Expr::str("gapic")).doc(Doc::words(
                "The name of the code generator, to be included in the agent header.",
            )),
        );

    if let Some(scopes) = &service.default_scopes {
        class = class.member(
            Property::new("serviceScopes")
                .static_()
                .value(ArrayLit::list(scopes.iter().map(|s| Some(Expr::str(s.as_str())))).into())
                .doc(Doc::words("The default scopes required by the service.")),
        );
    }

    class = class
        .member(client_defaults_method(service))
        .member(constructor(ctx));

    for method in &service.methods {
        tracing::debug!(method = %method.name, "generating rpc method");
        class = class.member(rpc_method(ctx, service, method, &message_ns));
    }

    let class_text = class.render(fmt)?;

    let mut out = String::new();
    out.push_str("<?php\n\ndeclare(strict_types=1);\n\n");
    out.push_str(&format!("namespace {};\n\n", ctx.namespace()));
    let uses = ctx.uses();
    for import in &uses {
        out.push_str(&format!("use {import};\n"));
    }
    if !uses.is_empty() {
        out.push('\n');
    }
    out.push_str(&class_text);
    Ok(out)
}

/// Message types live one namespace level above the generated client.
fn message_namespace(service: &ServiceDetails) -> String {
    service
        .client_namespace
        .strip_suffix("\\Gapic")
        .unwrap_or(&service.client_namespace)
        .to_string()
}

fn lines_doc(lines: &Vector<String>) -> Option<Doc> {
    if lines.is_empty() {
        None
    } else {
        Some(Doc::words(lines.to_vec().join(" ")))
    }
}

fn class_doc(ctx: &mut SourceFileContext, service: &ServiceDetails, message_ns: &str) -> Doc {
    let description = if service.doc_lines.is_empty() {
        None
    } else {
        Some(Doc::words(format!(
            "Service Description: {}",
            service.doc_lines.to_vec().join(" ")
        )))
    };
    let example = service.methods.first().map(|method| {
        Doc::example(
            method_example(ctx, service, method, message_ns),
            Some(Doc::words("Sample code to get started:")),
        )
    });
    Doc::block([
        description.into(),
        Doc::words(
            "This class provides the ability to make remote calls to the backing service \
             through method calls that map to API methods.",
        )
        .into(),
        example.into(),
        Doc::Experimental.into(),
    ])
}

/// The runnable usage sample embedded in documentation: construct the
/// client, call the method inside `try`, close in `finally`.
fn method_example(
    ctx: &mut SourceFileContext,
    service: &ServiceDetails,
    method: &MethodDetails,
    message_ns: &str,
) -> Block {
    let client_var = to_lower_camel(&service.client_class_name);

    let mut body: Vec<StmtTree> = Vec::new();
    let mut args: Vec<Expr> = Vec::new();
    for field in &method.required_fields {
        let var = to_lower_camel(&field.name);
        body.push(
            Stmt::assign(Expr::var(var.clone()), example_value(ctx, message_ns, &field.kind))
                .into(),
        );
        args.push(Expr::var(var));
    }
    body.push(
        Stmt::assign(
            Expr::var("response"),
            Expr::method_call(Expr::var(client_var.clone()), method.name.clone()).apply(args),
        )
        .into(),
    );

    let construct = Stmt::assign(
        Expr::var(client_var.clone()),
        Expr::new_object(service.client_class_name.clone(), []),
    );
    let guarded = Try::new(StmtTree::Group(body)).finally(Stmt::Expr(
        Expr::method_call(Expr::var(client_var), "close").into(),
    ));
    Block::new([construct.into(), guarded.into()])
}

/// Placeholder argument values used in samples.
fn example_value(ctx: &mut SourceFileContext, message_ns: &str, kind: &FieldKind) -> Expr {
    match kind {
        FieldKind::Int => Expr::int(0),
        FieldKind::Text => Expr::str(""),
        FieldKind::Bool => Expr::bool(false),
        FieldKind::Message(name) => {
            let resolved = ctx.resolve(&PhpType::in_namespace(message_ns, name.clone()));
            Expr::new_object(resolved.to_string(), [])
        }
    }
}

fn field_doc_type(ctx: &mut SourceFileContext, message_ns: &str, kind: &FieldKind) -> String {
    match kind {
        FieldKind::Message(name) => ctx
            .resolve(&PhpType::in_namespace(message_ns, name.clone()))
            .to_string(),
        other => other.doc_type(),
    }
}

fn client_defaults_method(service: &ServiceDetails) -> Method {
    let defaults = ArrayLit::new()
        .entry("serviceName", Expr::self_const("SERVICE_NAME"))
        .entry(
            "apiEndpoint",
            Expr::concat([
                service
                    .default_host
                    .as_ref()
                    .map(|_| Expr::self_const("SERVICE_ADDRESS")),
                Some(Expr::str(":")),
                Some(Expr::self_const("DEFAULT_SERVICE_PORT")),
            ]),
        )
        .entry(
            "clientConfig",
            Expr::concat([
                Some(Expr::dir()),
                Some(Expr::str(format!(
                    "/../resources/{}",
                    service.client_config_filename()
                ))),
            ]),
        )
        .entry(
            "descriptorsConfigPath",
            Expr::concat([
                Some(Expr::dir()),
                Some(Expr::str(format!(
                    "/../resources/{}",
                    service.descriptor_config_filename()
                ))),
            ]),
        )
        .entry(
            "gcpApiConfigPath",
            Expr::concat([
                Some(Expr::dir()),
                Some(Expr::str(format!(
                    "/../resources/{}",
                    service.grpc_config_filename()
                ))),
            ]),
        )
        .entry(
            "credentialsConfig",
            // The scopes entry drops out when the service declares none,
            // leaving an empty credentials config.
            Expr::from(ArrayLit::new().entry(
                "scopes",
                service
                    .default_scopes
                    .as_ref()
                    .map(|_| Expr::self_static_prop("serviceScopes")),
            )),
        )
        .entry(
            "transportConfig",
            Expr::from(ArrayLit::new().entry(
                "rest",
                Expr::from(ArrayLit::new().entry(
                    "restClientConfigPath",
                    Expr::concat([
                        Some(Expr::dir()),
                        Some(Expr::str(format!(
                            "/../resources/{}",
                            service.rest_config_filename()
                        ))),
                    ]),
                )),
            )),
        );
    Method::new(Visibility::Private, "getClientDefaults")
        .body(Block::new([Stmt::ret(defaults.into()).into()]))
}

fn constructor(ctx: &mut SourceFileContext) -> Method {
    let fetch_auth = ctx
        .resolve(&PhpType::from_name("Google\\Auth\\FetchAuthTokenInterface"))
        .to_string();
    let wrapper = ctx
        .resolve(&PhpType::from_name("Google\\ApiCore\\CredentialsWrapper"))
        .to_string();
    let transport = ctx
        .resolve(&PhpType::from_name(
            "Google\\ApiCore\\Transport\\TransportInterface",
        ))
        .to_string();
    let grpc_transport = ctx
        .resolve(&PhpType::from_name(
            "Google\\ApiCore\\Transport\\GrpcTransport",
        ))
        .to_string();
    let rest_transport = ctx
        .resolve(&PhpType::from_name(
            "Google\\ApiCore\\Transport\\RestTransport",
        ))
        .to_string();
    let validation = ctx
        .resolve(&PhpType::from_name("Google\\ApiCore\\ValidationException"))
        .to_string();

    let options_doc = Doc::block([
        Doc::words("Optional. Options for configuring the service API wrapper.").into(),
        Doc::type_tag(
            Vector::from(vec!["string".to_string()]),
            "serviceAddress",
            Doc::words(
                "**Deprecated**. This option will be removed in a future major release. \
                 Please utilize the `$apiEndpoint` option instead.",
            ),
        )
        .into(),
        Doc::type_tag(
            Vector::from(vec!["string".to_string()]),
            "apiEndpoint",
            Doc::words("The address of the API remote host, formatted as address:port."),
        )
        .into(),
        Doc::type_tag(
            Vector::from(vec![
                "string".to_string(),
                "array".to_string(),
                fetch_auth.clone(),
                wrapper.clone(),
            ]),
            "credentials",
            Doc::text([
                Fragment::from(
                    "The credentials to be used by the client to authorize API calls. This \
                     option accepts either a path to a credentials file, or a decoded \
                     credentials file as a PHP array. *Advanced usage*: In addition, this \
                     option can also accept a pre-constructed",
                ),
                Fragment::TypeRef(fetch_auth),
                Fragment::from("object or"),
                Fragment::TypeRef(wrapper.clone()),
                Fragment::from(
                    "object. Note that when one of these objects are provided, any settings \
                     in $credentialsConfig will be ignored.",
                ),
            ]),
        )
        .into(),
        Doc::type_tag(
            Vector::from(vec!["array".to_string()]),
            "credentialsConfig",
            Doc::text([
                Fragment::from(
                    "Options used to configure credentials, including auth token caching, \
                     for the client. For a full list of supporting configuration options, see",
                ),
                Fragment::CodeRef(Expr::static_call(wrapper, "build").apply([])),
            ]),
        )
        .into(),
        Doc::type_tag(
            Vector::from(vec!["bool".to_string()]),
            "disableRetries",
            Doc::words(
                "Determines whether or not retries defined by the client configuration \
                 should be disabled. Defaults to `false`.",
            ),
        )
        .into(),
        Doc::type_tag(
            Vector::from(vec!["string".to_string(), "array".to_string()]),
            "clientConfig",
            Doc::words("Client method configuration, including retry settings."),
        )
        .into(),
        Doc::type_tag(
            Vector::from(vec!["string".to_string(), transport]),
            "transport",
            Doc::words("The transport used for executing network requests."),
        )
        .into(),
        Doc::type_tag(
            Vector::from(vec!["array".to_string()]),
            "transportConfig",
            Doc::text([
                Fragment::from(
                    "Configuration options that will be used to construct the transport. \
                     Options for each supported transport type should be passed in a key \
                     for that transport. See the",
                ),
                Fragment::CodeRef(Expr::static_call(grpc_transport, "build").apply([])),
                Fragment::from("and"),
                Fragment::CodeRef(Expr::static_call(rest_transport, "build").apply([])),
                Fragment::from("methods for the supported options."),
            ]),
        )
        .into(),
    ]);
    let doc = Doc::block([
        Doc::words("Constructor.").into(),
        Doc::param(Vector::from(vec!["array".to_string()]), "options", options_doc).into(),
        Doc::throws(validation, None).into(),
        Doc::Experimental.into(),
    ]);
    Method::new(Visibility::Public, "__construct")
        .param(Param::typed("array", "options").default(ArrayLit::new().into()))
        .doc(doc)
        .body(Block::new([
            Stmt::assign(
                Expr::var("clientOptions"),
                Expr::this_call("buildClientOptions").apply([Expr::var("options")]),
            )
            .into(),
            Expr::this_call("setClientOptions")
                .apply([Expr::var("clientOptions")])
                .into(),
        ]))
}

fn rpc_method(
    ctx: &mut SourceFileContext,
    service: &ServiceDetails,
    method: &MethodDetails,
    message_ns: &str,
) -> Method {
    let request_ty = ctx.resolve(&method.request_type).to_string();
    let response_ty = ctx.resolve(&method.response_type).to_string();
    let rpc_name = to_upper_camel(&method.name);

    let mut stmts: Vec<StmtTree> = vec![Stmt::assign(
        Expr::var("request"),
        Expr::new_object(request_ty, []),
    )
    .into()];
    for field in &method.required_fields {
        let var = to_lower_camel(&field.name);
        stmts.push(
            Stmt::Expr(
                Expr::method_call(Expr::var("request"), field.setter.clone())
                    .apply([Expr::var(var)]),
            )
            .into(),
        );
    }
    for field in &method.optional_fields {
        let key = to_lower_camel(&field.name);
        let lookup = Expr::index(Expr::var("optionalArgs"), Expr::str(key.clone()));
        stmts.push(
            If::new(Expr::isset(lookup.clone()))
                .then(Stmt::Expr(
                    Expr::method_call(Expr::var("request"), field.setter.clone()).apply([lookup]),
                ))
                .into(),
        );
    }
    stmts.push(
        Stmt::ret(
            Expr::method_call(
                Expr::this_call("startCall").apply([
                    Expr::str(rpc_name),
                    Expr::class_const(response_ty.clone()),
                    Expr::var("optionalArgs"),
                    Expr::var("request"),
                ]),
                "wait",
            )
            .apply([]),
        )
        .into(),
    );

    let mut generated = Method::new(Visibility::Public, method.name.clone())
        .doc(rpc_doc(ctx, service, method, message_ns, &response_ty));
    for field in &method.required_fields {
        generated = generated.param(Param::new(to_lower_camel(&field.name)));
    }
    generated
        .param(Param::typed("array", "optionalArgs").default(ArrayLit::new().into()))
        .body(Block::new(stmts))
}

fn rpc_doc(
    ctx: &mut SourceFileContext,
    service: &ServiceDetails,
    method: &MethodDetails,
    message_ns: &str,
    response_ty: &str,
) -> Doc {
    let example = Doc::example(
        method_example(ctx, service, method, message_ns),
        Some(Doc::words("Sample code:")),
    );

    let mut params: Vec<DocTree> = Vec::new();
    for field in &method.required_fields {
        let ty = field_doc_type(ctx, message_ns, &field.kind);
        let description = lines_doc(&field.doc_lines).unwrap_or_else(|| Doc::words("Required."));
        params.push(
            Doc::param(
                Vector::from(vec![ty]),
                to_lower_camel(&field.name),
                description,
            )
            .into(),
        );
    }

    let mut optional_items: Vec<DocTree> = vec![Doc::words("Optional.").into()];
    for field in &method.optional_fields {
        let ty = field_doc_type(ctx, message_ns, &field.kind);
        let description = lines_doc(&field.doc_lines).unwrap_or_else(|| Doc::words(""));
        optional_items.push(
            Doc::type_tag(
                Vector::from(vec![ty]),
                to_lower_camel(&field.name),
                description,
            )
            .into(),
        );
    }
    let retry = ctx
        .resolve(&PhpType::from_name("Google\\ApiCore\\RetrySettings"))
        .to_string();
    optional_items.push(
        Doc::type_tag(
            Vector::from(vec![retry.clone(), "array".to_string()]),
            "retrySettings",
            Doc::text([
                Fragment::from("Retry settings to use for this call. Can be a"),
                Fragment::TypeRef(retry.clone()),
                Fragment::from(
                    "object, or an associative array of retry settings parameters. See the \
                     documentation on",
                ),
                Fragment::TypeRef(retry),
                Fragment::from("for example usage."),
            ]),
        )
        .into(),
    );
    params.push(
        Doc::param(
            Vector::from(vec!["array".to_string()]),
            "optionalArgs",
            Doc::block(optional_items),
        )
        .into(),
    );

    let api_exception = ctx
        .resolve(&PhpType::from_name("Google\\ApiCore\\ApiException"))
        .to_string();

    Doc::block([
        lines_doc(&method.doc_lines).into(),
        example.into(),
        DocTree::Group(params),
        Doc::return_tag(response_ty, None).into(),
        Doc::throws(api_exception, Some(Doc::words("if the remote call fails"))).into(),
        Doc::Experimental.into(),
    ])
}
