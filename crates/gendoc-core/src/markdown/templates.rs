//! Markdown templates and localized labels
//!
//! Copyright (c) 2025 Gendoc Contributors
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Language of the generated pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "english")]
    English,
    #[serde(rename = "zh", alias = "chinese")]
    Chinese,
}

impl Locale {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Locale::English => &ENGLISH,
            Locale::Chinese => &CHINESE,
        }
    }
}

/// Template text and display tokens for one locale
#[derive(Debug)]
pub struct Labels {
    /// README page; placeholders `{title}`, `{version}`, `{author}`, `{baseUrl}`
    pub readme: &'static str,
    /// Item page; placeholders `{name}`, `{method}`, `{url}`, `{reqTable}`,
    /// `{reqParam}`, `{respTable}`, `{respParam}`
    pub body: &'static str,
    /// Request table header; placeholder `{params}`
    pub request_table: &'static str,
    /// Response table header; placeholder `{params}`
    pub response_table: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    /// Text of the link from a row to its sub-table
    pub link: &'static str,
    pub index_heading: &'static str,
}

/// Request table row
pub const REQUEST_ROW: &str = "| {name} | {type} | {required} | {description} |\n";

/// Response table row
pub const RESPONSE_ROW: &str = "| {name} | {type} | {description} |\n";

/// Anchor and heading placed before every sub-table
pub const SUB_TABLE: &str = "\n<a id=\"{anchor}\"></a>\n##### {name}\n{table}";

static ENGLISH: Labels = Labels {
    readme: "# {title}
> Version: {version}<br>
> Author: {author}<br>
> BaseUrl: {baseUrl}
",
    body: "
# {name}

### Request
> Method: {method}<br>
URL: {url}

### Request Parameters
{reqTable}

### Request Example
{reqParam}

### Response Parameters
{respTable}

### Response Example
{respParam}
",
    request_table: "
| Field | Type | Required | Description |
|---------|--------------|--------|-----------|
{params}",
    response_table: "
| Field | Type | Description |
|---------|--------------|-----------|
{params}",
    yes: "yes",
    no: "no",
    link: "details",
    index_heading: "Endpoints",
};

static CHINESE: Labels = Labels {
    readme: "# {title}
> 版本号：{version}<br>
> 作者：{author}<br>
> BaseUrl: {baseUrl}
",
    body: "
# {name}

### 请求说明
> 请求方式：{method}<br>
请求URL ：{url}

### 请求参数
{reqTable}

### 请求示例
{reqParam}

### 返回参数
{respTable}

### 响应示例
{respParam}
",
    request_table: "
| 字段      | 字段类型       | 必填     | 字段说明    |
|---------|--------------|--------|-----------|
{params}",
    response_table: "
| 字段      | 字段类型       | 字段说明    |
|---------|--------------|-----------|
{params}",
    yes: "是",
    no: "否",
    link: "查看",
    index_heading: "接口列表",
};

/// Placeholder substitution
pub struct Template;

impl Template {
    /// Replace `{key}` placeholders in a single pass
    ///
    /// Inserted values are never scanned again, so braces inside them are kept
    /// verbatim. Unknown placeholders are left untouched.
    pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let value = after.find('}').and_then(|close| {
                let key = &after[..close];
                vars.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| (*v, close))
            });

            match value {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Escape text for a pipe-table cell
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Escape a type name so generic brackets stay visible
pub fn escape_type(text: &str) -> String {
    escape_cell(text).replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_replaces_known_placeholders() {
        let out = Template::fill("# {title} v{version}", &[("title", "API"), ("version", "1.0")]);
        assert_eq!(out, "# API v1.0");
    }

    #[test]
    fn test_fill_does_not_rescan_values() {
        let out = Template::fill("{a} {b}", &[("a", "{b}"), ("b", "x")]);
        assert_eq!(out, "{b} x");
    }

    #[test]
    fn test_fill_keeps_unknown_and_unbalanced() {
        assert_eq!(Template::fill("{missing} {", &[]), "{missing} {");
        assert_eq!(Template::fill("{{a}}", &[("a", "1")]), "{1}");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_type("Vec<String>"), "Vec&lt;String&gt;");
    }

    #[test]
    fn test_locale_labels() {
        assert_eq!(Locale::default(), Locale::English);
        assert_eq!(Locale::Chinese.labels().yes, "是");
        assert!(Locale::English.labels().request_table.contains("Required"));

        let locale: Locale = serde_json::from_str("\"zh\"").unwrap();
        assert_eq!(locale, Locale::Chinese);
    }
}
