//! `#[gendoc]` and `#[serde]` attribute parsing

use syn::punctuated::Punctuated;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, Token};

pub const RENAME: &str = "rename";
pub const DOC: &str = "doc";
pub const SKIP_NAME: &str = "-";

/// serde `rename_all` rules, applied to snake_case field names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    pub fn parse(rule: &str) -> Option<Self> {
        Some(match rule {
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            "PascalCase" => RenameRule::Pascal,
            "camelCase" => RenameRule::Camel,
            "snake_case" => RenameRule::Snake,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            "SCREAMING-KEBAB-CASE" => RenameRule::ScreamingKebab,
            _ => return None,
        })
    }

    pub fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_owned(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Pascal => {
                let mut pascal = String::with_capacity(field.len());
                let mut capitalize = true;
                for ch in field.chars() {
                    if ch == '_' {
                        capitalize = true;
                    } else if capitalize {
                        pascal.push(ch.to_ascii_uppercase());
                        capitalize = false;
                    } else {
                        pascal.push(ch);
                    }
                }
                pascal
            }
            RenameRule::Camel => {
                let pascal = RenameRule::Pascal.apply(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

#[derive(Debug, Default)]
pub struct ContainerAttrs {
    pub rename_all: Option<RenameRule>,
}

/// Read container attributes; `#[gendoc]` overrides `#[serde]`
pub fn container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        for meta in nested(attr)? {
            if let Meta::NameValue(nv) = &meta {
                if nv.path.is_ident("rename_all") {
                    out.rename_all = Some(rename_rule(&nv.value)?);
                }
            }
        }
    }

    for attr in attrs.iter().filter(|a| a.path().is_ident("gendoc")) {
        for meta in nested(attr)? {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                    out.rename_all = Some(rename_rule(&nv.value)?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unsupported container attribute, expected `rename_all = \"...\"`",
                    ))
                }
            }
        }
    }

    Ok(out)
}

/// Tags and flags of one field, tags in insertion order
#[derive(Debug, Default, PartialEq)]
pub struct FieldAttrs {
    pub tags: Vec<(String, String)>,
    pub embedded: bool,
}

impl FieldAttrs {
    fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.tags.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.tags.push((key, value)),
        }
    }

    /// True when the resolved name hides the field
    pub fn is_skipped(&self) -> bool {
        self.tags
            .iter()
            .any(|(k, v)| k == RENAME && v == SKIP_NAME)
    }
}

/// Read field attributes
///
/// Later sources replace earlier ones: doc comments, container rename rule,
/// `#[serde]`, then `#[gendoc]`.
pub fn field_attrs(
    attrs: &[Attribute],
    name: &str,
    rename_all: Option<RenameRule>,
) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();

    let doc = doc_text(attrs);
    if !doc.is_empty() {
        out.set(DOC, doc);
    }

    if let Some(rule) = rename_all {
        let renamed = rule.apply(name);
        if renamed != name {
            out.set(RENAME, renamed);
        }
    }

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        for meta in nested(attr)? {
            match &meta {
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    out.set(RENAME, literal(&nv.value)?);
                }
                Meta::List(list) if list.path.is_ident("rename") => {
                    let inner = list.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
                    for meta in inner {
                        if let Meta::NameValue(nv) = meta {
                            if nv.path.is_ident("serialize") {
                                out.set(RENAME, literal(&nv.value)?);
                            }
                        }
                    }
                }
                Meta::Path(path) if path.is_ident("skip") || path.is_ident("skip_serializing") => {
                    out.set(RENAME, SKIP_NAME);
                }
                Meta::Path(path) if path.is_ident("flatten") => out.embedded = true,
                _ => {}
            }
        }
    }

    for attr in attrs.iter().filter(|a| a.path().is_ident("gendoc")) {
        for meta in nested(attr)? {
            match &meta {
                Meta::Path(path) if path.is_ident("skip") => out.set(RENAME, SKIP_NAME),
                Meta::Path(path) if path.is_ident("flatten") => out.embedded = true,
                Meta::NameValue(nv) => {
                    let key = nv
                        .path
                        .get_ident()
                        .ok_or_else(|| syn::Error::new_spanned(&nv.path, "expected a plain tag name"))?;
                    out.set(key.to_string(), literal(&nv.value)?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "expected `skip`, `flatten` or `key = \"value\"`",
                    ))
                }
            }
        }
    }

    Ok(out)
}

fn nested(attr: &Attribute) -> syn::Result<Punctuated<Meta, Token![,]>> {
    attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
}

fn rename_rule(expr: &Expr) -> syn::Result<RenameRule> {
    let rule = literal(expr)?;
    RenameRule::parse(&rule)
        .ok_or_else(|| syn::Error::new_spanned(expr, format!("unknown rename rule `{}`", rule)))
}

/// Text of a string, integer, float or bool literal
fn literal(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Ok(s.value()),
            Lit::Int(i) => Ok(i.base10_digits().to_string()),
            Lit::Float(f) => Ok(f.base10_digits().to_string()),
            Lit::Bool(b) => Ok(b.value.to_string()),
            other => Err(syn::Error::new_spanned(other, "expected a string literal")),
        },
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

/// Doc comment lines joined with single spaces
fn doc_text(attrs: &[Attribute]) -> String {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    lines.join(" ")
}
