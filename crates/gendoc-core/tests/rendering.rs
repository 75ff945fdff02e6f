//! Page and document rendering

use gendoc_core::markdown::{anchor_id, Columns};
use gendoc_core::{
    Describe, DocItem, Document, DocumentRenderer, FileNaming, Locale, MemorySink, Method,
    PageRenderer, RenderConfig,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize, Describe)]
struct Nested {
    #[gendoc(rename = "A")]
    a: i32,
}

#[derive(Serialize, Describe)]
struct Scenario {
    #[gendoc(rename = "Source", validate = "required")]
    source: String,
    #[gendoc(rename = "UserName", validate = "required")]
    user_name: String,
    #[gendoc(rename = "Nested")]
    nested: Nested,
    #[gendoc(rename = "-")]
    hidden: i32,
}

fn scenario() -> Scenario {
    Scenario {
        source: "web".to_string(),
        user_name: "alice".to_string(),
        nested: Nested { a: 1 },
        hidden: 0,
    }
}

/// Text between two headings of a rendered page
fn section<'a>(page: &'a str, start: &str, end: &str) -> &'a str {
    let from = page.find(start).expect("start heading") + start.len();
    let to = page[from..].find(end).expect("end heading") + from;
    &page[from..to]
}

/// Data rows of the first table in `text`
fn primary_rows(text: &str) -> Vec<&str> {
    let primary = text.split("<a id=").next().unwrap_or_default();
    primary
        .lines()
        .filter(|l| l.starts_with("| ") && !l.starts_with("| Field"))
        .collect()
}

#[test]
fn test_end_to_end_scenario() {
    let mut doc = Document::new("User API");
    doc.add_item(DocItem::new("Create user", "/users/create", Method::Post).with_request(scenario()));
    doc.generate_fields().unwrap();

    let fields = doc.items()[0].request_fields();
    let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Source", "UserName", "Nested"]);
    assert_eq!(fields[2].children.len(), 1);
    assert_eq!(fields[2].children[0].name, "A");

    let page = PageRenderer::default().render_page(0, &doc.items()[0]).unwrap();
    let request = section(&page, "### Request Parameters", "### Request Example");

    assert_eq!(
        primary_rows(request),
        vec![
            "| Source | String | yes |  |",
            "| UserName | String | yes |  |",
            "| Nested | Nested | no | [details](#0.Nested) |",
        ]
    );

    let sub_tables: Vec<_> = request.match_indices("<a id=").collect();
    assert_eq!(sub_tables.len(), 1);
    let nested = &request[request.find("##### Nested").unwrap()..];
    assert_eq!(primary_rows(nested), vec!["| A | i32 | no |  |"]);
    assert!(!request.contains("hidden"));
}

#[test]
fn test_nil_request_renders_empty_section() {
    let item = DocItem::new("List users", "/users", Method::Get).with_response(json!({"total": 2}));
    let mut doc = Document::new("User API");
    doc.add_item(item);
    doc.generate_fields().unwrap();

    let item = &doc.items()[0];
    assert!(item.request_fields().is_empty());

    let page = PageRenderer::default().render_page(0, item).unwrap();
    let request = section(&page, "### Request Parameters", "### Request Example");
    let request_sample = section(&page, "### Request Example", "### Response Parameters");
    assert_eq!(request.trim(), "");
    assert_eq!(request_sample.trim(), "");

    let response = section(&page, "### Response Parameters", "### Response Example");
    assert_eq!(primary_rows(response), vec!["| total | integer |  |"]);
    assert!(page.contains("```json\n{\n  \"total\": 2\n}\n```"));
}

#[derive(Serialize, Describe)]
struct Owner {
    #[gendoc(rename = "Name")]
    name: String,
}

#[derive(Serialize, Describe)]
struct Resp {
    #[gendoc(rename = "Id", comment = "Identifier")]
    id: u32,
    #[gendoc(rename = "Owner")]
    owner: Owner,
}

#[test]
fn test_response_table_with_sub_table() {
    let mut doc = Document::new("API");
    doc.add_item(DocItem::new("Get", "/get", Method::Get).with_response(Resp {
        id: 1,
        owner: Owner {
            name: "bob".to_string(),
        },
    }));
    doc.generate_fields().unwrap();

    let out = PageRenderer::default().render_fields(
        0,
        doc.items()[0].response_fields(),
        Columns::Response,
    );

    let expected = concat!(
        "\n",
        "| Field | Type | Description |\n",
        "|---------|--------------|-----------|\n",
        "| Id | u32 | Identifier |\n",
        "| Owner | Owner | [details](#0.Owner) |\n",
        "\n",
        "<a id=\"0.Owner\"></a>\n",
        "##### Owner\n",
        "\n",
        "| Field | Type | Description |\n",
        "|---------|--------------|-----------|\n",
        "| Name | String |  |\n",
    );
    assert_eq!(out, expected);
}

#[test]
fn test_links_and_anchors_use_page_id() {
    let mut doc = Document::new("API");
    doc.add_item(DocItem::new("First", "/first", Method::Get))
        .add_item(DocItem::new("Second", "/second", Method::Post).with_request(scenario()));
    doc.generate_fields().unwrap();

    let mut sink = MemorySink::new();
    DocumentRenderer::new(&doc).render(&mut sink).unwrap();

    let page = sink.page("second.md").unwrap();
    let anchor = anchor_id(1, "Nested");
    assert_eq!(anchor, "1.Nested");
    assert!(page.contains(&format!("(#{})", anchor)));
    assert!(page.contains(&format!("<a id=\"{}\"></a>\n##### Nested", anchor)));
}

#[test]
fn test_document_layout_and_readme() {
    let mut doc = Document::new("User API")
        .with_version("1.0.0")
        .with_author("team")
        .with_base_url("http://localhost:8080")
        .with_file_naming(FileNaming::Title);
    doc.add_item(DocItem::new("Login", "/auth/login", Method::Post));
    doc.new_group("users")
        .add_item(DocItem::new("Create user", "/users/create", Method::Post).with_request(scenario()))
        .add_item(DocItem::new("Delete user", "/users/delete", Method::Delete));
    doc.generate_fields().unwrap();

    let config = RenderConfig {
        locale: Locale::Chinese,
        include_index: true,
    };
    let mut sink = MemorySink::new();
    let summary = DocumentRenderer::with_config(&doc, &config)
        .render(&mut sink)
        .unwrap();

    assert_eq!(summary.pages, 3);
    assert_eq!(summary.groups, 1);

    let paths: Vec<_> = sink
        .pages()
        .map(|(p, _)| p.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        paths,
        vec![
            "Login.md",
            "README.md",
            "users/Create user.md",
            "users/Delete user.md"
        ]
    );

    let readme = sink.page("README.md").unwrap();
    assert!(readme.starts_with("# User API\n> 版本号：1.0.0<br>\n> 作者：team<br>\n> BaseUrl: http://localhost:8080\n"));
    assert!(readme.contains("## 接口列表"));
    assert!(readme.contains("- [Create user](<users/Create user.md>) `POST` /users/create"));

    let page = sink.page("users/Create user.md").unwrap();
    assert!(page.contains("> 请求方式：POST<br>"));
    assert!(page.contains("| Source | String | 是 |  |"));
    assert!(page.contains("[查看](#0.Nested)"));
}

#[test]
fn test_render_error_is_configuration() {
    let mut doc = Document::new("API");
    doc.add_item(DocItem::new("Root", "/", Method::Get));
    doc.generate_fields().unwrap();

    let err = DocumentRenderer::new(&doc)
        .render(&mut MemorySink::new())
        .unwrap_err();
    assert!(err.is_configuration());
}
