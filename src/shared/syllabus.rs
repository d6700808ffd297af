//! Static syllabus catalogue: the twelve classes and the subjects taught in
//! each. Used by the syllabus page and as the class picker elsewhere.

const CLASS_PREFIX: &str = "Class ";

const PRIMARY: &[&str] = &["Math", "EVS", "English"];
const PRIMARY_HINDI: &[&str] = &["Math", "EVS", "English", "Hindi"];
const MIDDLE: &[&str] = &["Math", "Science", "English", "Hindi", "Social Science"];
const UPPER: &[&str] = &["Math", "Science", "English", "Hindi", "Social Science", "Computer"];
const SENIOR: &[&str] = &[
    "Math",
    "Physics",
    "Chemistry",
    "Biology",
    "English",
    "Computer Science",
    "Economics",
];

/// Number of classes in the catalogue
pub const CLASS_COUNT: u8 = 12;

/// Display labels, "Class 1" to "Class 12"
pub fn classes() -> Vec<String> {
    (1..=CLASS_COUNT).map(class_label).collect()
}

pub fn class_label(number: u8) -> String {
    format!("{}{}", CLASS_PREFIX, number)
}

/// Strip the "Class " prefix. The API addresses classes by number.
pub fn class_number(label: &str) -> &str {
    label.strip_prefix(CLASS_PREFIX).unwrap_or(label)
}

/// Subjects for a class label or bare class number. Unknown classes have
/// no subjects.
pub fn subjects_for(class: &str) -> &'static [&'static str] {
    match class_number(class).parse::<u8>() {
        Ok(1) => PRIMARY,
        Ok(2) => PRIMARY_HINDI,
        Ok(3..=5) => MIDDLE,
        Ok(6..=10) => UPPER,
        Ok(11 | 12) => SENIOR,
        _ => &[],
    }
}
