use phf::{Map, Set, phf_map, phf_set};

static THREE_TO_ONE_LETTER: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "CYS" => 'C', "ASP" => 'D', "GLU" => 'E',
    "PHE" => 'F', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LYS" => 'K', "LEU" => 'L', "MET" => 'M', "ASN" => 'N',
    "PRO" => 'P', "GLN" => 'Q', "ARG" => 'R', "SER" => 'S',
    "THR" => 'T', "VAL" => 'V', "TRP" => 'W', "TYR" => 'Y',
    // Common variants found in deposited structures
    "HSE" => 'H', "HSD" => 'H', "HSP" => 'H', "HID" => 'H', "HIE" => 'H', "HIP" => 'H',
    "MSE" => 'M', "SEC" => 'U', "PYL" => 'O',
};

static ONE_LETTER_CODES: Set<char> = phf_set! {
    'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V', 'W', 'Y',
    'U', 'O', 'B', 'Z', 'J', 'X',
};

/// Maps a residue name to its one-letter code.
///
/// Accepts both three-letter names (`"ALA"`, `"mse"`) and one-letter codes (`"A"`).
/// Unknown names yield `None`.
pub fn one_letter_code(residue_name: &str) -> Option<char> {
    let name = residue_name.trim().to_ascii_uppercase();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) if ONE_LETTER_CODES.contains(&code) => Some(code),
        _ => THREE_TO_ONE_LETTER.get(name.as_str()).copied(),
    }
}

pub fn is_residue_code(code: char) -> bool {
    ONE_LETTER_CODES.contains(&code.to_ascii_uppercase())
}
