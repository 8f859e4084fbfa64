pub trait NormalizeName {
    /// Returns the canonical form of a package identifier: lowercase, with
    /// every run of `-`, `_` and `.` collapsed into a single `-`.
    fn to_normalized_name(&self) -> String;
}

impl NormalizeName for str {
    fn to_normalized_name(&self) -> String {
        let mut out = String::with_capacity(self.len());
        let mut in_separator = false;
        for c in self.trim().chars() {
            if matches!(c, '-' | '_' | '.') {
                in_separator = true;
                continue;
            }
            if in_separator {
                if !out.is_empty() {
                    out.push('-');
                }
                in_separator = false;
            }
            out.push(c.to_ascii_lowercase());
        }
        out
    }
}

impl NormalizeName for String {
    fn to_normalized_name(&self) -> String {
        self.as_str().to_normalized_name()
    }
}
