//! CSV rendering for element exports

use crate::models::Element;

/// Fixed French column header, matching the element schema field order.
pub const CSV_HEADER: &str = "ID,Type,Configuration,Ouverture,Hauteur(mm),Largeur(mm),Profondeur(mm),Épaisseur(mm),Quantité,Notes";

/// Render one project's elements as a CSV document, header row included.
///
/// Missing optional fields render as empty cells. Newlines inside notes are
/// collapsed to spaces so every element stays on a single row.
pub fn render(elements: &[Element]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + elements.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for element in elements {
        let notes = element
            .notes_text
            .as_deref()
            .unwrap_or("")
            .replace(['\r', '\n'], " ");
        let row = [
            element.id.clone(),
            element.element_type.to_string(),
            escape(element.configuration.as_deref().unwrap_or("")),
            element.opening.map(|o| o.to_string()).unwrap_or_default(),
            format_dimension(element.height_mm),
            format_dimension(element.width_mm),
            format_dimension(element.depth_mm),
            format_dimension(element.thickness_mm),
            element.quantity.to_string(),
            escape(&notes),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

fn format_dimension(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Quote a field when it contains a separator, quote, or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ElementType, Opening};
    use mongodb::bson::oid::ObjectId;

    fn sample_element() -> Element {
        Element {
            id: ObjectId::new().to_hex(),
            project_id: ObjectId::new().to_hex(),
            building_id: None,
            element_type: ElementType::Porte,
            configuration: Some("simple".to_string()),
            opening: Some(Opening::Poussant),
            height_mm: Some(2100.0),
            width_mm: Some(900.0),
            depth_mm: None,
            thickness_mm: Some(40.5),
            quantity: 2,
            notes_text: None,
            notes_audio_url: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_no_elements_renders_header_only() {
        assert_eq!(render(&[]), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn test_row_follows_header_order() {
        let element = sample_element();
        let rendered = render(std::slice::from_ref(&element));

        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some(format!("{},porte,simple,poussant,2100,900,,40.5,2,", element.id).as_str())
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_missing_optionals_render_as_empty_cells() {
        let element = Element {
            configuration: None,
            opening: None,
            height_mm: None,
            width_mm: None,
            thickness_mm: None,
            ..sample_element()
        };
        let rendered = render(std::slice::from_ref(&element));
        let row = rendered.lines().nth(1).unwrap();

        assert_eq!(row.matches(',').count(), 9);
        assert_eq!(row, format!("{},porte,,,,,,,2,", element.id));
    }

    #[test]
    fn test_newlines_in_notes_collapse_to_spaces() {
        let element = Element {
            notes_text: Some("ligne un\nligne deux".to_string()),
            ..sample_element()
        };
        let rendered = render(&[element]);
        let row = rendered.lines().nth(1).unwrap();

        assert!(row.ends_with("ligne un ligne deux"));
    }

    #[test]
    fn test_fields_with_separators_are_quoted() {
        let element = Element {
            configuration: Some("double, coulissant".to_string()),
            notes_text: Some("dit \"urgent\"".to_string()),
            ..sample_element()
        };
        let rendered = render(&[element]);
        let row = rendered.lines().nth(1).unwrap();

        assert!(row.contains("\"double, coulissant\""));
        assert!(row.contains("\"dit \"\"urgent\"\"\""));
    }
}
