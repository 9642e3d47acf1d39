//! Style-object compilation and style-element construction.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::trace;

use purse_hash::ContentHasher;
use purse_types::{
    join_class_names, ClassName, Declarations, OwnedFragment, StyleElement, StyleInput,
    StyleObject, StyleRule,
};

use crate::case::PropertyNameCache;
use crate::error::CompileResult;
use crate::group::{group_style_object, merge_style_objects, GroupKind};
use crate::units::render_value;

/// Compiles style objects into content-addressed [`StyleElement`]s.
///
/// A compiler owns its property-name cache, so two compilers never share
/// state. Compilation is otherwise pure: the same input always yields the
/// same class name and rule text.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    names: PropertyNameCache,
    hasher: ContentHasher,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A compiler that hashes with `hasher` instead of the default.
    pub fn with_hasher(hasher: ContentHasher) -> Self {
        Self {
            names: PropertyNameCache::new(),
            hasher,
        }
    }

    pub fn property_names(&self) -> &PropertyNameCache {
        &self.names
    }

    /// Drop all memoized property names.
    pub fn clear_cache(&mut self) {
        self.names.clear();
    }

    /// Render a flat block as `prop:value;` pairs in insertion order.
    ///
    /// Null values are skipped.
    pub fn render_declarations(&mut self, declarations: &Declarations) -> String {
        let mut out = String::new();
        for (property, value) in declarations.iter() {
            let kebab = self.names.hyphenate(property);
            if let Some(rendered) = render_value(kebab, value) {
                out.push_str(kebab);
                out.push(':');
                out.push_str(&rendered);
                out.push(';');
            }
        }
        out
    }

    /// Render `selector{declarations}` for a rule that is not tied to a
    /// generated class name.
    pub fn render_global_rule(&mut self, selector: &str, declarations: &Declarations) -> StyleRule {
        let body = self.render_declarations(declarations);
        StyleRule::new(format!("{selector}{{{body}}}"))
    }

    /// Compile one style object into its owned fragment.
    ///
    /// Returns `Ok(None)` when no group has any declaration left, i.e. the
    /// object contributes nothing of its own.
    pub fn compile(&mut self, object: &StyleObject) -> CompileResult<Option<OwnedFragment>> {
        let groups = group_style_object(object);
        if groups.is_empty() {
            return Ok(None);
        }

        let mut rendered = Map::with_capacity(groups.len());
        for (key, declarations) in &groups {
            let body = self.render_declarations(declarations);
            rendered.insert(key.clone(), Value::String(body));
        }

        let class_name = self.hasher.hash_json(&rendered)?;
        let style_rules: Vec<StyleRule> = rendered
            .iter()
            .map(|(key, body)| rule_for_group(key, &class_name, body.as_str().unwrap_or_default()))
            .collect();

        trace!(class_name = %class_name, rules = style_rules.len(), "compiled style fragment");
        Ok(Some(OwnedFragment {
            class_name,
            style_rules,
        }))
    }

    /// Build a style element from previously built elements and raw objects.
    ///
    /// Elements become `composed` children in argument order. Raw objects are
    /// merged left to right and compiled into the owned fragment.
    pub fn build<I>(&mut self, inputs: I) -> CompileResult<Arc<StyleElement>>
    where
        I: IntoIterator,
        I::Item: Into<StyleInput>,
    {
        let mut composed = Vec::new();
        let mut raw = Vec::new();
        for input in inputs {
            match input.into() {
                StyleInput::Element(element) => composed.push(element),
                StyleInput::Raw(object) => raw.push(object),
            }
        }

        let merged = merge_style_objects(&raw);
        let owned = self.compile(&merged)?;

        let class_name = join_class_names(
            composed
                .iter()
                .map(|c| Some(c.class_name.as_str()))
                .chain(std::iter::once(owned.as_ref().map(|o| o.class_name.as_str()))),
        );

        Ok(Arc::new(StyleElement {
            class_name,
            composed,
            owned,
        }))
    }
}

/// Rule text for one compiled group.
fn rule_for_group(key: &str, class_name: &ClassName, body: &str) -> StyleRule {
    let selector = class_name.selector();
    let text = match GroupKind::of(key) {
        GroupKind::Base => format!("{selector}{{{body}}}"),
        GroupKind::AtRule => format!("{key}{{{selector}{{{body}}}}}"),
        GroupKind::Selector => format!("{}{{{body}}}", key.replace('&', &selector)),
    };
    StyleRule::new(text)
}

/// Every rule of an element's composition tree in pre-order (children
/// first, then own rules), without deduplication.
pub fn flatten_rules(element: &StyleElement) -> Vec<StyleRule> {
    let mut rules: Vec<StyleRule> = element
        .composed
        .iter()
        .flat_map(|child| flatten_rules(child))
        .collect();
    if let Some(owned) = &element.owned {
        rules.extend(owned.style_rules.iter().cloned());
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn build_one(compiler: &mut Compiler, object: StyleObject) -> Arc<StyleElement> {
        compiler.build([object]).unwrap()
    }

    fn rules(element: &StyleElement) -> Vec<&str> {
        element
            .owned
            .as_ref()
            .map(|o| o.style_rules.iter().map(StyleRule::as_str).collect())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Rule text
    // -----------------------------------------------------------------------

    #[test]
    fn compiles_base_declarations() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new()
                .with("accentColor", "blue")
                .with("borderColor", "blue"),
        );
        assert_eq!(el.class_name, "hKvrMJ");
        assert_eq!(rules(&el), vec![".hKvrMJ{accent-color:blue;border-color:blue;}"]);
    }

    #[test]
    fn expands_pseudo_selectors() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new().nested(
                "&:disabled",
                Declarations::new().with("backgroundColor", "blue"),
            ),
        );
        assert_eq!(el.class_name, "latRES");
        assert_eq!(rules(&el), vec![".latRES:disabled{background-color:blue;}"]);
    }

    #[test]
    fn wraps_at_rules() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new().nested(
                "@media (hover: hover)",
                Declarations::new().with("backgroundColor", "blue"),
            ),
        );
        assert_eq!(el.class_name, "fVIEDd");
        assert_eq!(
            rules(&el),
            vec!["@media (hover: hover){.fVIEDd{background-color:blue;}}"]
        );
    }

    #[test]
    fn multiple_selector_groups_each_render_once() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new()
                .nested("&:disabled", Declarations::new().with("backgroundColor", "blue"))
                .nested("&:disabled:hover", Declarations::new().with("backgroundColor", "red"))
                .nested("&:hover", Declarations::new().with("backgroundColor", "green")),
        );
        assert_eq!(el.class_name, "gcQBjs");
        assert_eq!(
            rules(&el),
            vec![
                ".gcQBjs:disabled{background-color:blue;}",
                ".gcQBjs:disabled:hover{background-color:red;}",
                ".gcQBjs:hover{background-color:green;}",
            ]
        );
    }

    #[test]
    fn replaces_every_ampersand() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new().nested("& + &", Declarations::new().with("marginLeft", 4)),
        );
        let name = el.owned_class_name().unwrap().clone();
        assert_eq!(rules(&el), vec![format!(".{name} + .{name}{{margin-left:4px;}}")]);
    }

    #[test]
    fn explicit_class_selector_is_literal() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new().nested(".child", Declarations::new().with("color", "red")),
        );
        assert_eq!(rules(&el), vec![".child{color:red;}"]);
    }

    #[test]
    fn base_rule_precedes_nested_rules() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new()
                .nested("&:hover", Declarations::new().with("color", "blue"))
                .with("color", "red"),
        );
        assert_eq!(el.class_name, "ZDdAG");
        assert_eq!(
            rules(&el),
            vec![".ZDdAG{color:red;}", ".ZDdAG:hover{color:blue;}"]
        );
    }

    #[test]
    fn empty_nested_group_contributes_no_rule() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new()
                .with("color", "red")
                .nested("&:hover", Declarations::new().with("color", None::<&str>)),
        );
        assert_eq!(el.class_name, "hUUekU");
        assert_eq!(rules(&el), vec![".hUUekU{color:red;}"]);
    }

    // -----------------------------------------------------------------------
    // Unit inference and property names
    // -----------------------------------------------------------------------

    #[test]
    fn infers_pixel_units() {
        let mut compiler = Compiler::new();
        let width = build_one(&mut compiler, StyleObject::new().with("width", 10));
        assert_eq!(rules(&width), vec![".fXSETt{width:10px;}"]);

        let opacity = build_one(&mut compiler, StyleObject::new().with("opacity", 0.5));
        assert_eq!(rules(&opacity), vec![".eAjFxo{opacity:0.5;}"]);
    }

    #[test]
    fn extreme_numbers_use_exponent_form() {
        let mut compiler = Compiler::new();
        let huge = build_one(&mut compiler, StyleObject::new().with("width", 1e21));
        assert_eq!(huge.class_name, "XJQLM");
        assert_eq!(rules(&huge), vec![".XJQLM{width:1e+21px;}"]);

        let tiny = build_one(&mut compiler, StyleObject::new().with("width", 1.5e-7));
        assert_eq!(tiny.class_name, "DUVNN");
        assert_eq!(rules(&tiny), vec![".DUVNN{width:1.5e-7px;}"]);
    }

    #[test]
    fn vendor_prefix_and_unitless_z_index() {
        let mut compiler = Compiler::new();
        let el = build_one(
            &mut compiler,
            StyleObject::new()
                .with("msTransition", "none")
                .with("zIndex", 2),
        );
        assert_eq!(rules(&el), vec![".eHgMDv{-ms-transition:none;z-index:2;}"]);
    }

    #[test]
    fn compiler_caches_property_names() {
        let mut compiler = Compiler::new();
        build_one(&mut compiler, StyleObject::new().with("backgroundColor", "red"));
        build_one(&mut compiler, StyleObject::new().with("backgroundColor", "blue"));
        assert_eq!(compiler.property_names().len(), 1);
        compiler.clear_cache();
        assert!(compiler.property_names().is_empty());
    }

    #[test]
    fn renders_global_rule() {
        let mut compiler = Compiler::new();
        let rule = compiler.render_global_rule(
            ":root",
            &Declarations::new()
                .with("--accent", "#09f")
                .with("fontSize", 16)
                .with("color", None::<&str>),
        );
        assert_eq!(rule, ":root{--accent:#09f;font-size:16px;}");
    }

    // -----------------------------------------------------------------------
    // Identity and composition
    // -----------------------------------------------------------------------

    #[test]
    fn compilation_is_deterministic() {
        let object = StyleObject::new()
            .with("color", "red")
            .nested("&:hover", Declarations::new().with("color", "blue"));
        let a = Compiler::new().build([object.clone()]).unwrap();
        let b = Compiler::new().build([object]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn declaration_order_changes_the_hash() {
        let mut compiler = Compiler::new();
        let a = build_one(&mut compiler, StyleObject::new().with("color", "red").with("width", 10));
        let b = build_one(&mut compiler, StyleObject::new().with("width", 10).with("color", "red"));
        assert_eq!(a.class_name, "kpAKNm");
        assert_eq!(b.class_name, "bWPlKy");
    }

    #[test]
    fn composition_only_elements_are_content_free() {
        let mut compiler = Compiler::new();
        let el = compiler.build([StyleObject::new(), StyleObject::new()]).unwrap();
        assert!(el.owned.is_none());
        assert_eq!(el.class_name, "");
        assert!(el.composed.is_empty());
    }

    #[test]
    fn no_inputs_builds_empty_element() {
        let el = Compiler::new().build(Vec::<StyleInput>::new()).unwrap();
        assert_eq!(*el, StyleElement::empty());
    }

    #[test]
    fn composition_orders_class_names() {
        let mut compiler = Compiler::new();
        let a = build_one(&mut compiler, StyleObject::new().with("margin", 1));
        let b = build_one(&mut compiler, StyleObject::new().with("padding", 1));
        let empty = compiler.build([StyleObject::new()]).unwrap();

        let parent = compiler
            .build([
                StyleInput::from(&a),
                StyleInput::from(&empty),
                StyleInput::from(&b),
                StyleObject::new().with("color", "red").into(),
            ])
            .unwrap();

        assert_eq!(
            parent.class_name,
            format!("{} {} hUUekU", a.class_name, b.class_name)
        );
        assert_eq!(parent.composed.len(), 3);
        assert!(Arc::ptr_eq(&parent.composed[0], &a));
        assert!(Arc::ptr_eq(&parent.composed[2], &b));
    }

    #[test]
    fn raw_inputs_merge_before_compiling() {
        let mut compiler = Compiler::new();
        let split = compiler
            .build([
                StyleObject::new()
                    .with("margin", 8)
                    .nested("&:hover", Declarations::new().with("color", "blue")),
                StyleObject::new()
                    .with("padding", 2)
                    .nested("&:hover", Declarations::new().with("opacity", 0.5)),
            ])
            .unwrap();
        assert_eq!(split.class_name, "iFMINv");
        assert_eq!(
            rules(&split),
            vec![
                ".iFMINv{margin:8px;padding:2px;}",
                ".iFMINv:hover{color:blue;opacity:0.5;}",
            ]
        );
    }

    #[test]
    fn independent_builds_share_identity() {
        let object = StyleObject::new().with("color", "red");
        let mut compiler = Compiler::new();
        let a = build_one(&mut compiler, object.clone());
        let b = build_one(&mut compiler, object);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.owned_class_name(), b.owned_class_name());
    }

    #[test]
    fn flatten_walks_children_first() {
        let mut compiler = Compiler::new();
        let a = build_one(&mut compiler, StyleObject::new().with("margin", 1));
        let parent = compiler
            .build([
                StyleInput::from(&a),
                StyleObject::new().with("color", "red").into(),
            ])
            .unwrap();
        let all = flatten_rules(&parent);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], a.owned.as_ref().unwrap().style_rules[0]);
        assert_eq!(all[1], ".hUUekU{color:red;}");
    }

    proptest! {
        #[test]
        fn width_always_gets_pixels(n in -10_000i32..10_000) {
            let mut compiler = Compiler::new();
            let el = build_one(&mut compiler, StyleObject::new().with("width", n));
            let rule = el.owned.as_ref().unwrap().style_rules[0].to_string();
            let expected = format!("{{width:{n}px;}}");
            prop_assert!(rule.ends_with(&expected));
        }

        #[test]
        fn class_names_are_tokens(value in "[a-z]{1,12}") {
            let mut compiler = Compiler::new();
            let el = build_one(&mut compiler, StyleObject::new().with("color", value));
            prop_assert!(el.class_name.bytes().all(|b| b.is_ascii_alphabetic()));
        }
    }
}
