use pagematter::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Read;
use tempfile::TempDir;

/// Hands out at most one byte per read call
struct OneByte<'a>(&'a [u8]);

impl Read for OneByte<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.0.split_first() {
            Some((first, rest)) if !buf.is_empty() => {
                buf[0] = *first;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn test_complete_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(
        root.join("post.md"),
        "---\ntitle: Post\ntags:\n  - rust\n  - parsing\n---\n# Post\n\nBody text.\n",
    )
    .unwrap();
    fs::write(
        root.join("config.md"),
        "+++\ntitle = \"Config\"\ndraft = true\n+++\nToml page\n",
    )
    .unwrap();
    fs::write(
        root.join("data.md"),
        "{\n  \"title\": \"Data\",\n  \"params\": {\"weight\": 3}\n}\nJson page\n",
    )
    .unwrap();
    fs::write(root.join("raw.html"), "<html><body>raw</body></html>\n").unwrap();
    fs::write(root.join("notes.txt"), "---\nignored: true\n---\n").unwrap();

    let files = FileResolver::new().resolve_paths(&[root]).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|f| f.path().file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["config.md", "data.md", "post.md", "raw.html"]);

    let reader = PageReader::new();
    let mut titles = Vec::new();
    for file in &files {
        let page = reader.read_file(file.path()).unwrap();
        if let Some(meta) = page.metadata().unwrap() {
            titles.push(meta.get_str("title").unwrap().to_string());
        } else {
            assert!(!page.is_renderable());
            assert_eq!(page.content(), b"<html><body>raw</body></html>\n");
        }
    }
    assert_eq!(titles, vec!["Config", "Data", "Post"]);

    let data = reader.read_file(root.join("data.md")).unwrap();
    assert_eq!(data.content(), b"Json page\n");
    assert_eq!(
        data.metadata().unwrap().unwrap().to_json().unwrap()["params"]["weight"],
        3
    );
}

#[test]
fn test_markup_pages_are_not_renderable() {
    for input in [&b"<div>hi</div>"[..], b"  \n<p>", b"<"] {
        let page = Page::from_bytes(input).unwrap();
        assert!(!page.is_renderable());
        assert!(page.front_matter().is_empty());
        assert_eq!(page.content(), input.trim_ascii_start());
    }
}

#[test]
fn test_yaml_line_endings() {
    let lf = Page::from_bytes(b"---\na: 1\n---\nbody").unwrap();
    assert_eq!(lf.front_matter(), b"---\na: 1\n---\n");
    assert_eq!(lf.content(), b"body");

    let crlf = Page::from_bytes(b"---\r\na: 1\r\n---\r\nbody").unwrap();
    assert_eq!(crlf.front_matter(), b"---\r\na: 1\r\n---\r\n");
    assert_eq!(crlf.content(), b"body");
    assert_eq!(crlf.metadata().unwrap().unwrap().to_json().unwrap()["a"], 1);
}

#[test]
fn test_comment_wrapped_front_matter() {
    let input = b"<!--\n---\ntitle: Hidden\n---\n-->\nVisible content for the reader.\n";
    let page = Page::from_bytes(input).unwrap();
    assert!(page.is_renderable());
    assert_eq!(page.front_matter(), b"---\ntitle: Hidden\n---\n");
    assert_eq!(page.content(), b"Visible content for the reader.\n");
}

#[test]
fn test_short_comment_is_markup() {
    // Too short for the wrapper lookahead, so the `<` wins
    let page = Page::from_bytes(b"<!--\n---\na: 1\n---\n-->\n").unwrap();
    assert!(!page.is_renderable());
    assert!(page.front_matter().is_empty());
}

#[test]
fn test_nested_json() {
    let page = Page::from_bytes(b"{\"a\":{\"b\":[1,{\"c\":2}]}}\nrest").unwrap();
    assert_eq!(page.front_matter(), b"{\"a\":{\"b\":[1,{\"c\":2}]}}");
    assert_eq!(page.content(), b"rest");
    assert_eq!(page.front_matter_format(), Some(FrontMatterFormat::Json));
}

#[test]
fn test_short_json_object() {
    let page = Page::from_bytes(b"{\"a\":1}\nrest").unwrap();
    assert_eq!(page.front_matter(), b"{\"a\":1}");
    assert_eq!(page.content(), b"rest");
}

#[test]
fn test_empty_and_plain_input() {
    let empty = Page::from_bytes(b"").unwrap();
    assert!(empty.is_renderable());
    assert!(!empty.has_front_matter());
    assert!(empty.content().is_empty());

    let plain = Page::from_bytes(b"\n\n# Just markdown\n").unwrap();
    assert!(plain.is_renderable());
    assert!(!plain.has_front_matter());
    assert_eq!(plain.content(), b"# Just markdown\n");
    assert_eq!(plain.metadata().unwrap(), None);
}

#[test]
fn test_malformed_front_matter() {
    let err = Page::from_bytes(b"---\na: 1\n").unwrap_err();
    assert!(matches!(err, PageError::UnterminatedFrontMatter { .. }));

    let err = Page::from_bytes(b"+++\na = 1\n+++x\n").unwrap_err();
    assert!(matches!(err, PageError::MalformedDelimiter { .. }));
    assert!(err.offset().is_some());

    let err = Page::from_bytes(b"{\"a\": {\"b\": 1}\n").unwrap_err();
    assert!(matches!(err, PageError::UnterminatedFrontMatter { .. }));
}

#[test]
fn test_stream_and_slice_agree() {
    let input = b"\n\n<!--\n+++\ntitle = \"Slow\"\n+++\n-->\nDelivered one byte at a time.\n";
    let from_stream = Page::read_from(OneByte(input)).unwrap();
    let from_slice = Page::from_bytes(input).unwrap();
    assert_eq!(from_stream, from_slice);
    assert_eq!(from_stream.content(), b"Delivered one byte at a time.\n");
}

#[test]
fn test_decode_errors_surface_lazily() {
    let page = Page::from_bytes(b"---\n: : bad\n  - [\n---\nbody").unwrap();
    assert_eq!(page.content(), b"body");
    let err = page.metadata().unwrap_err();
    assert!(matches!(err, PageError::Yaml(_)));
}

#[test]
fn test_typed_metadata() {
    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Header {
        title: String,
        weight: i64,
    }

    let page = Page::from_bytes(b"+++\ntitle = \"Typed\"\nweight = 7\n+++\n").unwrap();
    let header: Header = page.metadata().unwrap().unwrap().deserialize().unwrap();
    assert_eq!(
        header,
        Header {
            title: "Typed".into(),
            weight: 7
        }
    );
}

#[test]
fn test_toml_dates_in_json_output() {
    let page = Page::from_bytes(b"+++\ntitle = \"x\"\ndate = 2017-01-02T03:04:05Z\n+++\nbody").unwrap();
    let json = page.metadata().unwrap().unwrap().to_json().unwrap();
    assert_eq!(
        json,
        serde_json::json!({"title": "x", "date": "2017-01-02T03:04:05Z"})
    );
    assert_eq!(page.content(), b"body");
}
