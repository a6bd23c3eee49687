use crate::types::Category;

pub(crate) const ALL_PROGRAMS: &str = "All Programs";

const ALL_PROGRAMS_ICON: &str = "rpi";
const FALLBACK_CATEGORY_ICON: &str = "applications-other";
pub(crate) const FALLBACK_PACKAGE_ICON: &str = "application-x-executable";

static CATEGORY_ICONS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "Programming" => "applications-development",
    "Office" => "applications-office",
    "Internet" => "applications-internet",
    "Games" => "applications-games",
    "Other" => "applications-other",
    "Accessories" => "applications-accessories",
    "Sound & Video" => "applications-multimedia",
    "System Tools" => "applications-system",
    "Engineering" => "applications-engineering",
    "Education" => "applications-science",
    "Graphics" => "applications-graphics",
    "Science & Maths" => "applications-science",
    "Preferences" => "preferences-desktop",
};

pub(crate) fn icon_name_for_category(category: &str) -> &'static str {
    if category == ALL_PROGRAMS {
        return ALL_PROGRAMS_ICON;
    }
    CATEGORY_ICONS
        .get(category)
        .copied()
        .unwrap_or(FALLBACK_CATEGORY_ICON)
}

pub(crate) fn all_programs() -> Category {
    Category {
        name: ALL_PROGRAMS.to_string(),
        icon: ALL_PROGRAMS_ICON,
    }
}

/// Appends `name` unless a category with exactly that name already exists.
pub(crate) fn push_unique(categories: &mut Vec<Category>, name: &str) -> bool {
    if categories.iter().any(|category| category.name == name) {
        return false;
    }
    categories.push(Category {
        name: name.to_string(),
        icon: icon_name_for_category(name),
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_unknown_category_icons() {
        assert_eq!(icon_name_for_category("Internet"), "applications-internet");
        assert_eq!(icon_name_for_category("Science & Maths"), "applications-science");
        assert_eq!(icon_name_for_category("internet"), FALLBACK_CATEGORY_ICON);
        assert_eq!(icon_name_for_category(ALL_PROGRAMS), "rpi");
    }

    #[test]
    fn push_unique_is_case_sensitive_and_ordered() {
        let mut categories = vec![all_programs()];
        assert!(push_unique(&mut categories, "Games"));
        assert!(push_unique(&mut categories, "Internet"));
        assert!(!push_unique(&mut categories, "Games"));
        assert!(push_unique(&mut categories, "games"));

        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["All Programs", "Games", "Internet", "games"]);
    }
}
