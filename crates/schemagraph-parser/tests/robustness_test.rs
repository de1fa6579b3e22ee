//! Property tests: extraction degrades gracefully on arbitrary input.

use proptest::prelude::*;

use schemagraph_parser::{extract, fields::split_fields, scanner::scan};

/// Fragments that exercise the structural matchers when shuffled together.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("const ".to_string()),
        Just("UserSchema".to_string()),
        Just(" = new Schema({".to_string()),
        Just("mongoose.Schema<IUser>(".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just(")".to_string()),
        Just(",".to_string()),
        Just(":".to_string()),
        Just("'".to_string()),
        Just("\"".to_string()),
        Just("`".to_string()),
        Just("/".to_string()),
        Just("/*".to_string()),
        Just("\n// FILE: x.js\n".to_string()),
        Just("type: Schema.Types.ObjectId".to_string()),
        Just("ref: 'User'".to_string()),
        Just("model('User', UserSchema)".to_string()),
        Just("export default ".to_string()),
        "[a-zA-Z_ \\n\\\\]{0,8}",
    ]
}

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..40).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn extract_never_panics_on_arbitrary_text(input in "\\PC{0,200}") {
        let _ = extract(&input);
    }

    #[test]
    fn extract_never_panics_on_schema_like_text(input in source()) {
        let extraction = extract(&input);
        let graph = extraction.graph();
        for edge in graph.relationships() {
            prop_assert!(graph.contains(edge.from()));
        }
    }

    #[test]
    fn diagnostic_spans_stay_inside_input(input in source()) {
        let extraction = extract(&input);
        for diagnostic in extraction.diagnostics() {
            for label in diagnostic.labels() {
                prop_assert!(label.span().end() <= input.len());
                prop_assert!(input.is_char_boundary(label.span().start()));
                prop_assert!(input.is_char_boundary(label.span().end()));
            }
        }
    }

    #[test]
    fn schema_ids_are_unique(input in source()) {
        let extraction = extract(&input);
        let mut ids: Vec<_> = extraction.graph().schemas().iter().map(|s| s.id()).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), total);
    }

    #[test]
    fn declaration_bodies_are_slices_of_input(input in source()) {
        let result = scan(&input);
        for declaration in result.declarations().values() {
            let start = declaration.body_offset();
            let end = start + declaration.body().len();
            prop_assert_eq!(&input[start..end], declaration.body());
        }
    }

    #[test]
    fn split_fields_never_panics(body in source()) {
        for field in split_fields(&body) {
            prop_assert!(!field.name().is_empty());
            prop_assert!(!field.name().contains(char::is_whitespace));
        }
    }

    #[test]
    fn extraction_is_deterministic(input in source()) {
        let first = extract(&input);
        let second = extract(&input);
        prop_assert_eq!(first.graph(), second.graph());
        prop_assert_eq!(first.diagnostics(), second.diagnostics());
    }
}
