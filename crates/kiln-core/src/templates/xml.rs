//! Small edits to XML payloads: inserting directives into existing
//! documents without a full XML parser

/// Insert a snippet line before the last occurrence of a closing tag
///
/// Idempotent: when the trimmed snippet already appears in the document the
/// input is returned unchanged. A document without the closing tag is also
/// returned unchanged.
pub fn insert_before_closing(xml: &str, closing_tag: &str, snippet: &str) -> String {
    if xml.contains(snippet.trim()) {
        return xml.to_string();
    }
    match xml.rfind(closing_tag) {
        Some(pos) => format!("{}{}\n{}", &xml[..pos], snippet, &xml[pos..]),
        None => xml.to_string(),
    }
}

/// Insert an `<import resource="..."/>` directive into a Spring-style
/// `<beans>` document
pub fn insert_import(xml: &str, resource: &str) -> String {
    let import = format!("    <import resource=\"{}\"/>", resource);
    insert_before_closing(xml, "</beans>", &import)
}

/// Insert a `<module>` entry into a Maven `<modules>` section
pub fn insert_module_entry(xml: &str, module: &str) -> String {
    let entry = format!("        <module>{}</module>", module);
    insert_before_closing(xml, "</modules>", &entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEANS: &str = "<?xml version=\"1.0\"?>\n<beans>\n</beans>\n";

    #[test]
    fn test_insert_import() {
        let out = insert_import(BEANS, "classpath:modules/demo/service-context.xml");
        assert_eq!(
            out,
            "<?xml version=\"1.0\"?>\n<beans>\n    <import resource=\"classpath:modules/demo/service-context.xml\"/>\n</beans>\n"
        );
    }

    #[test]
    fn test_insert_import_is_idempotent() {
        let once = insert_import(BEANS, "classpath:a.xml");
        let twice = insert_import(&once, "classpath:a.xml");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_closing_tag_leaves_document_unchanged() {
        let xml = "<beans>";
        assert_eq!(insert_import(xml, "classpath:a.xml"), xml);
    }

    #[test]
    fn test_insert_module_entry() {
        let pom = "<project>\n    <modules>\n        <module>demo-repo</module>\n    </modules>\n</project>\n";
        let out = insert_module_entry(pom, "ledger");
        assert!(out.contains("<module>ledger</module>"));
        // The new entry lands inside the modules section.
        assert!(out.find("<module>ledger</module>").unwrap() < out.find("</modules>").unwrap());
    }

    #[test]
    fn test_insert_module_entry_is_idempotent() {
        let pom = "<project>\n    <modules>\n        <module>ledger</module>\n    </modules>\n</project>\n";
        assert_eq!(insert_module_entry(pom, "ledger"), pom);
    }
}
