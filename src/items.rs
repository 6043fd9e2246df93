/// AI tools usage items (X group), in questionnaire order.
pub const X_ITEMS: [&str; 10] = [
    "Saya menggunakan AI tools untuk membantu memahami materi kuliah.",
    "AI tools membantu saya menyelesaikan tugas lebih cepat.",
    "AI tools membuat saya lebih mudah menemukan penjelasan konsep.",
    "Saya menggunakan AI tools secara rutin saat belajar mandiri.",
    "AI tools membantu saya merangkum materi kuliah.",
    "Saya menggunakan AI tools untuk mendapatkan ide saat mengerjakan tugas.",
    "AI tools membuat proses belajar saya terasa lebih efisien.",
    "Saya merasa lebih percaya diri belajar dengan bantuan AI tools.",
    "AI tools membantu saya memperbaiki kesalahan dalam tugas atau laporan.",
    "Saya merasa kualitas hasil belajar saya meningkat dengan bantuan AI Tools.",
];

/// Learning effectiveness items (Y group), in questionnaire order.
pub const Y_ITEMS: [&str; 10] = [
    "Saya mampu memahami materi kuliah dengan baik.",
    "Saya dapat menyelesaikan tugas tepat waktu.",
    "Saya mampu fokus saat belajar.",
    "Metode belajar saya terasa semakin efektif.",
    "Produktivitas belajar saya meningkat.",
    "Saya dapat meninjau materi dengan lebih terstruktur.",
    "Saya mampu mengatur waktu belajar dengan baik.",
    "Saya mampu mengingat materi pembelajaran dengan lebih baik.",
    "Saya dapat menyelesaikan lebih banyak materi dalam waktu yang sama.",
    "Saya merasa hasil belajar saya meningkat secara keseluruhan.",
];

pub const ITEMS_PER_GROUP: usize = 10;
pub const TOTAL_ITEMS: usize = ITEMS_PER_GROUP * 2;

/// A respondent must answer at least this many of the 20 items to be kept.
pub const MIN_ANSWERED_ITEMS: usize = 18;

pub const X_TOTAL: &str = "X_total";
pub const Y_TOTAL: &str = "Y_total";
pub const X_MEAN: &str = "X_mean";
pub const Y_MEAN: &str = "Y_mean";

pub const COMPOSITE_COLUMNS: [&str; 4] = [X_TOTAL, Y_TOTAL, X_MEAN, Y_MEAN];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGroup {
    X,
    Y,
}

impl ItemGroup {
    pub fn items(self) -> &'static [&'static str; ITEMS_PER_GROUP] {
        match self {
            ItemGroup::X => &X_ITEMS,
            ItemGroup::Y => &Y_ITEMS,
        }
    }

    /// Offset of this group's first item within the 20-item answer array.
    pub fn offset(self) -> usize {
        match self {
            ItemGroup::X => 0,
            ItemGroup::Y => ITEMS_PER_GROUP,
        }
    }
}

/// All 20 item columns, X items first.
pub fn all_items() -> impl Iterator<Item = &'static str> {
    X_ITEMS.iter().chain(Y_ITEMS.iter()).copied()
}
