//! CSS inlining: `<style>` rules become `style` attributes.
//!
//! Rules apply in order of selector specificity, then source order. An
//! element's own `style` declarations beat stylesheet rules, and
//! `!important` stylesheet declarations beat both. Rules that have no
//! inline equivalent (at-rules, dynamic pseudo-classes, selectors the
//! engine cannot compile) are kept in a single `<style>` element.

use super::dom;
use super::stylesheet::{parse_declarations, Declaration, StyleRule, Stylesheet};
use crate::error::Result;
use kuchiki::traits::*;
use kuchiki::{NodeRef, Selector, Selectors, Specificity};

/// Selectors containing these only match in an interactive user agent.
const DYNAMIC_PSEUDO_CLASSES: &[&str] = &[
    ":hover", ":active", ":focus", ":visited", ":link", ":target", "::",
];

struct CompiledRule<'a> {
    selector: Selector,
    order: usize,
    declarations: &'a [Declaration],
}

/// Inline every `<style>` rule onto the elements it matches.
///
/// HTML comment markers are removed from the whole content first;
/// `pdftohtml` wraps its stylesheet in `<!-- -->`.
pub fn inline_css(html: &str) -> Result<String> {
    let html = strip_comment_markers(html);
    let document = dom::parse(&html);
    let styles = dom::select_all(&document, "style")?;
    if styles.is_empty() {
        return dom::serialize(&document);
    }

    let css = styles
        .iter()
        .map(|style| style.as_node().text_contents())
        .collect::<Vec<_>>()
        .join("\n");
    let sheet = Stylesheet::parse(&css);

    let mut retained = sheet.at_rules.clone();
    let compiled = compile_rules(&sheet.rules, &mut retained);

    let mut styled = 0usize;
    for element in document.descendants().elements() {
        let mut matched: Vec<(Specificity, usize, &[Declaration])> = compiled
            .iter()
            .filter(|rule| rule.selector.matches(&element))
            .map(|rule| (rule.selector.specificity(), rule.order, rule.declarations))
            .collect();
        if matched.is_empty() {
            continue;
        }
        matched.sort_by_key(|(specificity, order, _)| (*specificity, *order));

        let mut attributes = element.attributes.borrow_mut();
        let style = cascade(
            matched.iter().flat_map(|(_, _, declarations)| declarations.iter()),
            attributes.get("style"),
        );
        attributes.insert("style", style);
        styled += 1;
    }

    log::debug!(
        "Inlined {} CSS rules onto {} elements, {} rules kept in <style>",
        sheet.rules.len(),
        styled,
        retained.len()
    );

    let mut styles = styles.into_iter();
    if let Some(first) = styles.next() {
        let node = first.as_node();
        if retained.is_empty() {
            node.detach();
        } else {
            for child in node.children().collect::<Vec<_>>() {
                child.detach();
            }
            node.append(NodeRef::new_text(retained.join("\n")));
        }
    }
    for style in styles {
        style.as_node().detach();
    }

    dom::serialize(&document)
}

/// Remove `<!--` and `-->` markers.
pub fn strip_comment_markers(html: &str) -> String {
    html.replace("<!--", "").replace("-->", "")
}

fn compile_rules<'a>(rules: &'a [StyleRule], retained: &mut Vec<String>) -> Vec<CompiledRule<'a>> {
    let mut compiled = Vec::new();

    for (order, rule) in rules.iter().enumerate() {
        for selector_text in &rule.selectors {
            let keep = StyleRule {
                selectors: vec![selector_text.clone()],
                declarations: rule.declarations.clone(),
            };

            if is_dynamic(selector_text) {
                log::trace!("Keeping dynamic rule: {}", selector_text);
                retained.push(keep.to_css());
                continue;
            }

            match Selectors::compile(selector_text) {
                Ok(selectors) => {
                    for selector in selectors.0 {
                        compiled.push(CompiledRule {
                            selector,
                            order,
                            declarations: &rule.declarations,
                        });
                    }
                }
                Err(()) => {
                    log::warn!("Unsupported CSS selector kept in <style>: {}", selector_text);
                    retained.push(keep.to_css());
                }
            }
        }
    }

    compiled
}

fn is_dynamic(selector: &str) -> bool {
    let selector = selector.to_ascii_lowercase();
    DYNAMIC_PSEUDO_CLASSES
        .iter()
        .any(|pseudo| selector.contains(pseudo))
}

/// Merge matched declarations (lowest precedence first) with an existing
/// `style` attribute.
fn cascade<'a>(sheet: impl Iterator<Item = &'a Declaration>, inline: Option<&str>) -> String {
    let mut normal: Vec<(String, String)> = Vec::new();
    let mut sheet_important = Vec::new();
    let mut inline_important = Vec::new();

    for declaration in sheet {
        if declaration.important {
            sheet_important.push(declaration.clone());
        } else {
            set_property(&mut normal, declaration);
        }
    }

    for declaration in inline.map(parse_declarations).unwrap_or_default() {
        if declaration.important {
            inline_important.push(declaration);
        } else {
            set_property(&mut normal, &declaration);
        }
    }

    for declaration in sheet_important.iter().chain(inline_important.iter()) {
        set_property(&mut normal, declaration);
    }

    normal
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn set_property(block: &mut Vec<(String, String)>, declaration: &Declaration) {
    block.retain(|(name, _)| *name != declaration.name);
    block.push((declaration.name.clone(), declaration.value.clone()));
}
