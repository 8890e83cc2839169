//! Class declarations assembled member by member.

use apigen_ast::{block_to_source, expr_to_source, Block, Expr, RenderError};
use apigen_doc::{Doc, Reformatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Class constant.
#[derive(Clone, Debug)]
pub struct Constant {
    name: String,
    value: Expr,
    doc: Option<Doc>,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: Expr) -> Constant {
        Constant {
            name: name.into(),
            value,
            doc: None,
        }
    }

    pub fn doc(mut self, doc: Doc) -> Constant {
        self.doc = Some(doc);
        self
    }
}

/// Class property. Always private; the generated surface exposes state
/// through methods only.
#[derive(Clone, Debug)]
pub struct Property {
    name: String,
    is_static: bool,
    value: Option<Expr>,
    doc: Option<Doc>,
}

impl Property {
    pub fn new(name: impl Into<String>) -> Property {
        Property {
            name: name.into(),
            is_static: false,
            value: None,
            doc: None,
        }
    }

    pub fn static_(mut self) -> Property {
        self.is_static = true;
        self
    }

    pub fn value(mut self, value: Expr) -> Property {
        self.value = Some(value);
        self
    }

    pub fn doc(mut self, doc: Doc) -> Property {
        self.doc = Some(doc);
        self
    }
}

/// Method parameter: optional type hint, optional default.
#[derive(Clone, Debug)]
pub struct Param {
    name: String,
    ty: Option<String>,
    default: Option<Expr>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Param {
        Param {
            name: name.into(),
            ty: None,
            default: None,
        }
    }

    pub fn typed(ty: impl Into<String>, name: impl Into<String>) -> Param {
        Param {
            name: name.into(),
            ty: Some(ty.into()),
            default: None,
        }
    }

    pub fn default(mut self, default: Expr) -> Param {
        self.default = Some(default);
        self
    }

    fn to_source(&self) -> Result<String, RenderError> {
        let mut out = String::new();
        if let Some(ty) = &self.ty {
            out.push_str(ty);
            out.push(' ');
        }
        out.push('$');
        out.push_str(&self.name);
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(&expr_to_source(default)?);
        }
        Ok(out)
    }
}

#[derive(Clone, Debug)]
pub struct Method {
    name: String,
    visibility: Visibility,
    is_static: bool,
    params: Vec<Param>,
    body: Block,
    doc: Option<Doc>,
}

impl Method {
    pub fn new(visibility: Visibility, name: impl Into<String>) -> Method {
        Method {
            name: name.into(),
            visibility,
            is_static: false,
            params: Vec::new(),
            body: Block::default(),
            doc: None,
        }
    }

    pub fn static_(mut self) -> Method {
        self.is_static = true;
        self
    }

    pub fn param(mut self, param: Param) -> Method {
        self.params.push(param);
        self
    }

    pub fn body(mut self, body: Block) -> Method {
        self.body = body;
        self
    }

    pub fn doc(mut self, doc: Doc) -> Method {
        self.doc = Some(doc);
        self
    }
}

/// A class member, rendered in declaration order.
#[derive(Clone, Debug)]
pub enum Member {
    Constant(Constant),
    Property(Property),
    Method(Method),
}

impl From<Constant> for Member {
    fn from(constant: Constant) -> Member {
        Member::Constant(constant)
    }
}

impl From<Property> for Member {
    fn from(property: Property) -> Member {
        Member::Property(property)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Member {
        Member::Method(method)
    }
}

/// A complete class declaration.
#[derive(Clone, Debug, Default)]
pub struct ClassDef {
    name: String,
    uses_trait: Option<String>,
    doc: Option<Doc>,
    members: Vec<Member>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> ClassDef {
        ClassDef {
            name: name.into(),
            ..ClassDef::default()
        }
    }

    pub fn uses_trait(mut self, name: impl Into<String>) -> ClassDef {
        self.uses_trait = Some(name.into());
        self
    }

    pub fn doc(mut self, doc: Doc) -> ClassDef {
        self.doc = Some(doc);
        self
    }

    pub fn member(mut self, member: impl Into<Member>) -> ClassDef {
        self.members.push(member.into());
        self
    }

    /// Render the full declaration and pass it through the reformatter,
    /// which settles indentation and blank-line layout.
    pub fn render(&self, fmt: &dyn Reformatter) -> Result<String, RenderError> {
        let mut out = String::new();
        if let Some(doc) = &self.doc {
            push_doc(doc, fmt, &mut out)?;
        }
        out.push_str(&format!("class {}\n{{\n", self.name));
        if let Some(trait_name) = &self.uses_trait {
            out.push_str(&format!("use {trait_name};\n\n"));
        }
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            push_member(member, fmt, &mut out)?;
        }
        out.push_str("}\n");
        Ok(fmt.format(&out))
    }
}

fn push_doc(doc: &Doc, fmt: &dyn Reformatter, out: &mut String) -> Result<(), RenderError> {
    out.push_str("/**\n");
    for line in &doc.to_lines(fmt)? {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(&format!(" * {line}\n"));
        }
    }
    out.push_str(" */\n");
    Ok(())
}

fn push_member(member: &Member, fmt: &dyn Reformatter, out: &mut String) -> Result<(), RenderError> {
    match member {
        Member::Constant(constant) => {
            if let Some(doc) = &constant.doc {
                push_doc(doc, fmt, out)?;
            }
            out.push_str(&format!(
                "const {} = {};\n",
                constant.name,
                expr_to_source(&constant.value)?
            ));
        }
        Member::Property(property) => {
            if let Some(doc) = &property.doc {
                push_doc(doc, fmt, out)?;
            }
            out.push_str("private ");
            if property.is_static {
                out.push_str("static ");
            }
            out.push('$');
            out.push_str(&property.name);
            if let Some(value) = &property.value {
                out.push_str(&format!(" = {}", expr_to_source(value)?));
            }
            out.push_str(";\n");
        }
        Member::Method(method) => {
            if let Some(doc) = &method.doc {
                push_doc(doc, fmt, out)?;
            }
            let params = method
                .params
                .iter()
                .map(Param::to_source)
                .collect::<Result<Vec<_>, _>>()?
                .join(", ");
            out.push_str(method.visibility.keyword());
            if method.is_static {
                out.push_str(" static");
            }
            out.push_str(&format!(" function {}({params})\n{{\n", method.name));
            out.push_str(&block_to_source(&method.body)?);
            out.push_str("}\n");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests can panic")]

    use super::*;
    use crate::BasicFormatter;
    use apigen_ast::Stmt;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_a_documented_class() {
        let class = ClassDef::new("EchoClient")
            .doc(Doc::words("Service client."))
            .member(Constant::new("SERVICE_NAME", Expr::str("example.echo.v1.Echo")))
            .member(
                Method::new(Visibility::Public, "close")
                    .body(Block::new([Expr::from(Expr::this_call("doClose")).into()])),
            );

        let expected = "\
/**
 * Service client.
 */
class EchoClient
{
    const SERVICE_NAME = 'example.echo.v1.Echo';

    public function close()
    {
        $this->doClose();
    }
}
";
        assert_eq!(class.render(&BasicFormatter).unwrap(), expected);
    }

    #[test]
    fn renders_trait_use_and_static_property() {
        let class = ClassDef::new("EchoGapicClient")
            .uses_trait("GapicClientTrait")
            .member(
                Property::new("serviceScopes")
                    .static_()
                    .value(apigen_ast::ArrayLit::list([Some(Expr::str("scope-a"))]).into()),
            );

        let expected = "\
class EchoGapicClient
{
    use GapicClientTrait;

    private static $serviceScopes = ['scope-a'];
}
";
        assert_eq!(class.render(&BasicFormatter).unwrap(), expected);
    }

    #[test]
    fn renders_typed_param_with_default() {
        let class = ClassDef::new("C").member(
            Method::new(Visibility::Public, "ping")
                .param(Param::new("name"))
                .param(Param::typed("array", "optionalArgs").default(apigen_ast::ArrayLit::new().into()))
                .body(Block::new([Stmt::ret(Expr::var("name")).into()])),
        );

        let expected = "\
class C
{
    public function ping($name, array $optionalArgs = [])
    {
        return $name;
    }
}
";
        assert_eq!(class.render(&BasicFormatter).unwrap(), expected);
    }

    #[test]
    fn member_docs_render_above_their_member() {
        let class = ClassDef::new("C")
            .member(Constant::new("X", Expr::int(1)).doc(Doc::words("The x value.")));
        let text = class.render(&BasicFormatter).unwrap();
        assert!(text.contains("    /**\n     * The x value.\n     */\n    const X = 1;"));
    }
}
