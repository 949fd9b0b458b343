use laboratory::{expect, SpecContext};
use serde_json::{json, Value};

use devgw_gateway::libs::xml::{self, XmlError, MAX_DEPTH};

use crate::TestState;

/// Test [`xml::parse`] with valid documents.
pub fn parse(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let root = match xml::parse("<root><a>1</a><b> text </b><c/></root>") {
        Err(e) => return Err(format!("parse simple error: {}", e)),
        Ok(root) => root,
    };
    expect(root.name.as_str()).to_equal("root")?;
    expect(root.children.len()).to_equal(3)?;
    expect(root.children[0].name.as_str()).to_equal("a")?;
    expect(root.children[0].text.as_str()).to_equal("1")?;
    expect(root.children[1].name.as_str()).to_equal("b")?;
    expect(root.children[1].text.as_str()).to_equal("text")?;
    expect(root.children[2].name.as_str()).to_equal("c")?;
    expect(root.children[2].text.as_str()).to_equal("")?;
    expect(root.children[2].children.len()).to_equal(0)?;

    let root = match xml::parse("<?xml version=\"1.0\"?><r><x><y>deep</y></x></r>") {
        Err(e) => return Err(format!("parse nested error: {}", e)),
        Ok(root) => root,
    };
    expect(root.children[0].children[0].text.as_str()).to_equal("deep")?;

    let root = match xml::parse("<r><v><![CDATA[a<b]]></v></r>") {
        Err(e) => return Err(format!("parse CDATA error: {}", e)),
        Ok(root) => root,
    };
    expect(root.children[0].text.as_str()).to_equal("a<b")?;

    let root = match xml::parse("<r>&lt;escaped&gt;</r>") {
        Err(e) => return Err(format!("parse escape error: {}", e)),
        Ok(root) => root,
    };
    expect(root.text.as_str()).to_equal("<escaped>")
}

/// Test [`xml::parse`] with invalid documents.
pub fn parse_error(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    match xml::parse("") {
        Err(XmlError::Empty) => (),
        Err(e) => return Err(format!("empty document wrong error: {}", e)),
        Ok(_) => return Err("empty document should fail".to_string()),
    }
    match xml::parse("   \n  ") {
        Err(XmlError::Empty) => (),
        Err(e) => return Err(format!("blank document wrong error: {}", e)),
        Ok(_) => return Err("blank document should fail".to_string()),
    }
    match xml::parse("<a><b></a>") {
        Err(XmlError::Malformed(_)) => (),
        Err(e) => return Err(format!("mismatched tags wrong error: {}", e)),
        Ok(_) => return Err("mismatched tags should fail".to_string()),
    }
    match xml::parse("<a>1</a><b>2</b>") {
        Err(XmlError::Malformed(_)) => (),
        Err(e) => return Err(format!("multiple roots wrong error: {}", e)),
        Ok(_) => return Err("multiple roots should fail".to_string()),
    }
    match xml::parse("<a><b>") {
        Err(XmlError::Malformed(_)) => (),
        Err(e) => return Err(format!("unclosed element wrong error: {}", e)),
        Ok(_) => return Err("unclosed element should fail".to_string()),
    }

    let mut doc = String::new();
    for i in 0..=MAX_DEPTH {
        doc.push_str(format!("<e{}>", i).as_str());
    }
    for i in (0..=MAX_DEPTH).rev() {
        doc.push_str(format!("</e{}>", i).as_str());
    }
    match xml::parse(doc.as_str()) {
        Err(XmlError::TooDeep(depth)) => expect(depth).to_equal(MAX_DEPTH),
        Err(e) => Err(format!("deep document wrong error: {}", e)),
        Ok(_) => Err("deep document should fail".to_string()),
    }
}

/// Test [`xml::convert`].
pub fn convert(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    // Leaf text stays a string without type inference.
    let root = match xml::parse("<root><num>42</num><flag>true</flag></root>") {
        Err(e) => return Err(format!("parse error: {}", e)),
        Ok(root) => root,
    };
    let value = xml::convert(&root);
    expect(value == json!({"num": "42", "flag": "true"})).to_equal(true)?;

    // Repeated sibling tags become an array in document order.
    let root = match xml::parse(
        "<list><item><id>1</id></item><item><id>2</id></item><item><id>3</id></item></list>",
    ) {
        Err(e) => return Err(format!("parse error: {}", e)),
        Ok(root) => root,
    };
    let value = xml::convert(&root);
    let expected = json!({"item": [{"id": "1"}, {"id": "2"}, {"id": "3"}]});
    expect(value == expected).to_equal(true)?;

    // Distinct keys keep first-occurrence order.
    let root = match xml::parse("<r><b>1</b><a>2</a><b>3</b><c>4</c></r>") {
        Err(e) => return Err(format!("parse error: {}", e)),
        Ok(root) => root,
    };
    let value = xml::convert(&root);
    let text = match serde_json::to_string(&value) {
        Err(e) => return Err(format!("serialize error: {}", e)),
        Ok(text) => text,
    };
    expect(text.as_str()).to_equal("{\"b\":[\"1\",\"3\"],\"a\":\"2\",\"c\":\"4\"}")?;

    // A container child always becomes a nested object.
    let root = match xml::parse("<r><inner><only>v</only></inner></r>") {
        Err(e) => return Err(format!("parse error: {}", e)),
        Ok(root) => root,
    };
    let value = xml::convert(&root);
    expect(value == json!({"inner": {"only": "v"}})).to_equal(true)?;

    // Whitespace-only leaf becomes an empty string.
    let root = match xml::parse("<r><e>  </e><f/></r>") {
        Err(e) => return Err(format!("parse error: {}", e)),
        Ok(root) => root,
    };
    let value = xml::convert(&root);
    expect(value == json!({"e": "", "f": ""})).to_equal(true)
}

/// Test [`xml::to_json`].
pub fn to_json(_context: &mut SpecContext<TestState>) -> Result<(), String> {
    let root = match xml::parse("<root><sensor>T1</sensor><sensor>T2</sensor></root>") {
        Err(e) => return Err(format!("parse error: {}", e)),
        Ok(root) => root,
    };
    let doc = xml::to_json(&root);
    let text = match serde_json::to_string(&doc) {
        Err(e) => return Err(format!("serialize error: {}", e)),
        Ok(text) => text,
    };
    expect(text.as_str()).to_equal("{\"root\":{\"sensor\":[\"T1\",\"T2\"]}}")?;

    // Structural round trip through serialized JSON.
    let reparsed: Value = match serde_json::from_str(text.as_str()) {
        Err(e) => return Err(format!("reparse error: {}", e)),
        Ok(value) => value,
    };
    expect(reparsed == doc).to_equal(true)?;

    let root = match xml::parse("<only>leaf</only>") {
        Err(e) => return Err(format!("parse error: {}", e)),
        Ok(root) => root,
    };
    let doc = xml::to_json(&root);
    expect(doc == json!({"only": "leaf"})).to_equal(true)
}
