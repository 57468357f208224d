//! Static fallback catalogs shown when the backend cannot serve a list.
//!
//! The catalogs are never persisted and never merged with live data. Search and
//! pagination over them happen here, client-side.

use crate::models::{PageQuery, PageWindow, Salon, School, Service, User};
use crate::store::Resource;

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

pub fn salons() -> Vec<Salon> {
    vec![
        Salon {
            id: "1".to_string(),
            name: "Glow Beauty Studio".to_string(),
            email: text("hello@glowstudio.example"),
            phone: text("+44 20 7946 0101"),
            address: text("14 Market Street, London"),
            description: text("Hair colour, cuts and bridal styling."),
            is_active: true,
        },
        Salon {
            id: "2".to_string(),
            name: "The Nail Lounge".to_string(),
            email: text("bookings@naillounge.example"),
            phone: text("+44 161 496 0202"),
            address: text("3 King Street, Manchester"),
            description: text("Manicures, pedicures and nail art."),
            is_active: true,
        },
        Salon {
            id: "3".to_string(),
            name: "Urban Barber Co.".to_string(),
            email: text("team@urbanbarber.example"),
            phone: text("+44 121 496 0303"),
            address: text("88 Broad Street, Birmingham"),
            description: text("Classic cuts, fades and hot towel shaves."),
            is_active: false,
        },
    ]
}

pub fn services() -> Vec<Service> {
    let service = |id: &str, name: &str, description: &str, price: f64, minutes: u32, salon: (&str, &str)| Service {
        id: id.to_string(),
        name: name.to_string(),
        description: text(description),
        price: Some(price),
        duration_minutes: Some(minutes),
        salon_id: text(salon.0),
        salon_name: text(salon.1),
        is_active: true,
    };

    vec![
        service("1", "Cut & Blow Dry", "Wash, cut and finish.", 45.0, 60, ("1", "Glow Beauty Studio")),
        service("2", "Full Head Colour", "Single process permanent colour.", 95.0, 120, ("1", "Glow Beauty Studio")),
        service("3", "Gel Manicure", "Shape, cuticle care and gel polish.", 30.0, 45, ("2", "The Nail Lounge")),
        service("4", "Skin Fade", "Clipper fade with scissor finish.", 25.0, 40, ("3", "Urban Barber Co.")),
    ]
}

pub fn users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, department: (&str, &str), role: (&str, &str), active: bool| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        department_id: text(department.0),
        department_name: text(department.1),
        role_id: text(role.0),
        role_name: text(role.1),
        is_active: active,
    };

    vec![
        user("1", "Amira Khan", "amira@salonbook.example", ("1", "Operations"), ("1", "Administrator"), true),
        user("2", "Daniel Reyes", "daniel@salonbook.example", ("2", "Partnerships"), ("2", "Manager"), true),
        user("3", "Lena Fischer", "lena@salonbook.example", ("3", "Support"), ("3", "Agent"), false),
    ]
}

pub fn schools() -> Vec<School> {
    vec![
        School {
            id: "1".to_string(),
            name: "London Academy of Hairdressing".to_string(),
            email: text("admissions@lah.example"),
            phone: text("+44 20 7946 0404"),
            address: text("21 Fleet Street, London"),
            description: text("Level 2 and 3 hairdressing diplomas."),
            is_active: true,
        },
        School {
            id: "2".to_string(),
            name: "Northern Beauty School".to_string(),
            email: text("info@northernbeauty.example"),
            phone: text("+44 113 496 0505"),
            address: text("5 Park Row, Leeds"),
            description: text("Beauty therapy and nail technician courses."),
            is_active: true,
        },
        School {
            id: "3".to_string(),
            name: "Barber Skills Institute".to_string(),
            email: text("hello@barberskills.example"),
            phone: text("+44 117 496 0606"),
            address: text("9 Corn Street, Bristol"),
            description: text("Barbering from foundation to advanced fades."),
            is_active: false,
        },
    ]
}

/// Page of the mock catalog for `query`.
///
/// A non-empty search filters the catalog by case-insensitive substring over the
/// resource's searchable fields, so a failed search never shows everything.
pub fn fallback_page<R: Resource>(query: &PageQuery) -> (Vec<R>, PageWindow) {
    let needle = query.search_term().to_lowercase();
    let matches: Vec<R> = R::mock_catalog()
        .into_iter()
        .filter(|record| needle.is_empty() || record.matches_search(&needle))
        .collect();

    let total = matches.len() as u64;
    let limit = u64::from(query.page_size.limit());
    let total_pages = u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX).max(1);
    let page = query.page.clamp(1, total_pages);
    let start = (u64::from(page - 1) * limit) as usize;

    let records = matches
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();

    (records, PageWindow::new(page, total_pages, total, query.page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageSize;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(salons().len(), 3);
        assert_eq!(services().len(), 4);
        assert_eq!(users().len(), 3);
        assert_eq!(schools().len(), 3);
    }

    #[test]
    fn test_unfiltered_fallback_is_single_page() {
        let (records, window) = fallback_page::<Salon>(&PageQuery::new(1, PageSize::Limit(10), ""));
        assert_eq!(records.len(), 3);
        assert_eq!(window.current_page, 1);
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.total_records, 3);
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let (records, window) = fallback_page::<Salon>(&PageQuery::new(1, PageSize::Limit(10), "NAIL"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "The Nail Lounge");
        assert_eq!(window.total_records, 1);

        // Matches on the embedded salon name as well as the service's own fields.
        let (records, _) = fallback_page::<Service>(&PageQuery::new(1, PageSize::All, "glow beauty"));
        assert_eq!(records.len(), 2);

        let (records, _) = fallback_page::<User>(&PageQuery::new(1, PageSize::All, "daniel@"));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let (records, window) =
            fallback_page::<School>(&PageQuery::new(1, PageSize::Limit(10), "nonexistent-xyz"));
        assert!(records.is_empty());
        assert_eq!(window.total_records, 0);
        assert_eq!(window.current_page, 1);
    }

    #[test]
    fn test_client_side_pagination() {
        let (records, window) = fallback_page::<Service>(&PageQuery::new(2, PageSize::Limit(3), ""));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "4");
        assert_eq!(window.current_page, 2);
        assert_eq!(window.total_pages, 2);

        let (_, window) = fallback_page::<Service>(&PageQuery::new(7, PageSize::Limit(3), ""));
        assert_eq!(window.current_page, 2);
    }
}
