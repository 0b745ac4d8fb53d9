use serde::{Deserialize, Serialize};

/// Address sub-object as the civic-information service sends it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// Formats an address into a single display line.
///
/// Each street line present becomes its own segment; whichever of city,
/// state and zip are present form one trailing segment. Segments are joined
/// with `", "`. A missing address formats as the empty string.
pub fn format_address(address: Option<&AddressFields>) -> String {
    let Some(address) = address else {
        return String::new();
    };

    let city_state_zip: Vec<&str> = [&address.city, &address.state, &address.zip]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    let locality = city_state_zip.join(", ");

    let mut parts: Vec<&str> = [&address.line1, &address.line2, &address.line3]
        .into_iter()
        .filter_map(|line| line.as_deref())
        .collect();
    if !city_state_zip.is_empty() {
        parts.push(&locality);
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(line1: Option<&str>, city: Option<&str>, state: Option<&str>, zip: Option<&str>) -> AddressFields {
        AddressFields {
            line1: line1.map(String::from),
            city: city.map(String::from),
            state: state.map(String::from),
            zip: zip.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn missing_or_empty_address_is_blank() {
        assert_eq!(format_address(None), "");
        assert_eq!(format_address(Some(&AddressFields::default())), "");
    }

    #[test]
    fn street_then_city_state_zip() {
        let address = fields(Some("12 Main St"), Some("Raleigh"), Some("NC"), Some("27601"));
        assert_eq!(format_address(Some(&address)), "12 Main St, Raleigh, NC, 27601");
    }

    #[test]
    fn every_street_line_is_its_own_segment() {
        let address = AddressFields {
            line1: Some("Wake County Board of Elections".into()),
            line2: Some("1200 N New Hope Rd".into()),
            line3: Some("Suite 100".into()),
            state: Some("NC".into()),
            ..Default::default()
        };
        assert_eq!(
            format_address(Some(&address)),
            "Wake County Board of Elections, 1200 N New Hope Rd, Suite 100, NC"
        );
    }

    #[test]
    fn locality_only() {
        let address = fields(None, Some("Durham"), None, Some("27701"));
        assert_eq!(format_address(Some(&address)), "Durham, 27701");
    }

    #[test]
    fn location_name_is_not_part_of_the_line() {
        let address = AddressFields {
            location_name: Some("Fire Station 3".into()),
            line1: Some("5 Oak Ave".into()),
            ..Default::default()
        };
        assert_eq!(format_address(Some(&address)), "5 Oak Ave");
    }
}
