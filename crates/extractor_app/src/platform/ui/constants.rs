pub const BRAND: &str = "AlphaTechAI";
pub const HEADLINE: &str = "USPTO Trademark Scraper";
pub const TAGLINE: &str =
    "AI-powered automation to extract cancelled trademark data and save to Google Sheets";

pub const LABEL_QUERY: &str = "USPTO Search Formula";
pub const HINT_QUERY: &str = "Example: CD:[2015-07-01 TO 2015-07-05] AND EN:INDIVIDUAL OW:USA";
pub const LABEL_DESTINATION: &str = "Google Sheets URL";
pub const PLACEHOLDER_DESTINATION: &str = "https://docs.google.com/spreadsheets/d/...";
pub const HINT_DESTINATION: &str = "Make sure the spreadsheet is shared with the service account";

pub const SHEET_WRITTEN: &str = "Data has been successfully written to your Google Sheet";
pub const PREVIEW_HEADING: &str = "Preview of extracted data:";

pub const HOW_IT_WORKS: [&str; 4] = [
    "Enter your USPTO search formula (e.g., date range and filters)",
    "Provide your Google Sheets URL",
    "Click \"Start Extraction\" and let AI do the work",
    "Data is automatically extracted and saved to your spreadsheet",
];

pub const EXTRACTED_FIELDS: [&str; 7] = [
    "Correspondent Email",
    "Phone Number",
    "Correspondent Name",
    "Date Cancelled",
    "US Serial Number",
    "Mark (Trademark Name)",
    "Goods & Services Description",
];

pub const KEY_HELP: &str = "Tab/Shift+Tab: move | Enter: newline in formula, submit elsewhere | \
Ctrl+S: submit | PgUp/PgDn: scroll | Esc: quit";
