use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Lang {
    /// Bahasa Indonesia
    #[default]
    Id,
    /// English
    En,
}

/// User-facing labels for one language.
#[derive(Debug)]
pub struct Strings {
    pub app_title: &'static str,
    pub page_overview: &'static str,
    pub page_desc: &'static str,
    pub page_reliability: &'static str,
    pub page_corr: &'static str,
    pub generated_at: &'static str,
    pub source_label: &'static str,
    pub preview_title: &'static str,
    pub missing_cols_error: &'static str,
    pub missing_cols_hint: &'static str,
    pub missing_x_label: &'static str,
    pub missing_y_label: &'static str,
    pub respondent_before_clean: &'static str,
    pub respondent_after_clean: &'static str,
    pub no_valid_resp: &'static str,
    pub desc_item_title: &'static str,
    pub desc_comp_title: &'static str,
    pub reliability_title: &'static str,
    pub alpha_x_label: &'static str,
    pub alpha_y_label: &'static str,
    pub undefined: &'static str,
    pub normality_title: &'static str,
    pub normality_x_label: &'static str,
    pub normality_y_label: &'static str,
    pub statistic_failed: &'static str,
    pub corr_title: &'static str,
    pub corr_method_pearson: &'static str,
    pub corr_method_spearman: &'static str,
    pub corr_coef_label: &'static str,
    pub p_value_label: &'static str,
    pub corr_sig: &'static str,
    pub corr_nonsig: &'static str,
    pub corr_undetermined: &'static str,
    pub viz_title: &'static str,
    pub hist_x_title: &'static str,
    pub hist_y_title: &'static str,
    pub hist_bin_label: &'static str,
    pub hist_ylabel: &'static str,
    pub scatter_title: &'static str,
    pub scatter_xlabel: &'static str,
    pub scatter_ylabel: &'static str,
    pub export_written: &'static str,
    pub report_written: &'static str,
}

static INDONESIAN: Strings = Strings {
    app_title: "📊 Analisis Pengaruh Penggunaan AI Tools terhadap Efektivitas Belajar Mahasiswa",
    page_overview: "Ringkasan & Data",
    page_desc: "Statistik Deskriptif",
    page_reliability: "Reliabilitas & Normalitas",
    page_corr: "Korelasi & Visualisasi",
    generated_at: "Dibuat pada",
    source_label: "Sumber data",
    preview_title: "👀 Preview Data (5 baris pertama)",
    missing_cols_error: "Masih ada kolom yang tidak ditemukan di CSV.",
    missing_cols_hint: "Pastikan teks pertanyaan di Google Forms tidak diubah ketika export CSV.",
    missing_x_label: "Missing kolom X (AI Tools)",
    missing_y_label: "Missing kolom Y (Efektivitas Belajar)",
    respondent_before_clean: "Jumlah responden sebelum cleaning:",
    respondent_after_clean: "Jumlah responden setelah cleaning (min 18/20 item terisi):",
    no_valid_resp: "Tidak ada responden yang memenuhi kriteria valid (>=18 item terisi).",
    desc_item_title: "📌 Statistik Deskriptif — Item-level",
    desc_comp_title: "📌 Statistik Deskriptif — Skor Komposit (X_total & Y_total)",
    reliability_title: "🧪 Reliabilitas (Cronbach's Alpha)",
    alpha_x_label: "α untuk Penggunaan AI Tools (X):",
    alpha_y_label: "α untuk Efektivitas Belajar (Y):",
    undefined: "tidak terdefinisi",
    normality_title: "🧪 Uji Normalitas (Shapiro-Wilk) pada X_total dan Y_total",
    normality_x_label: "X_total",
    normality_y_label: "Y_total",
    statistic_failed: "Tidak dapat dihitung",
    corr_title: "📈 Korelasi antara Penggunaan AI (X_total) dan Efektivitas Belajar (Y_total)",
    corr_method_pearson: "Metode korelasi: **Pearson Correlation** (karena data normal).",
    corr_method_spearman: "Metode korelasi: **Spearman Rank Correlation** (karena data tidak normal).",
    corr_coef_label: "Koefisien korelasi (r):",
    p_value_label: "p-value:",
    corr_sig: "Kesimpulan: Terdapat hubungan yang **signifikan** antara penggunaan AI tools dan efektivitas belajar mahasiswa (p < 0.05).",
    corr_nonsig: "Kesimpulan: Tidak terdapat hubungan yang signifikan antara penggunaan AI tools dan efektivitas belajar mahasiswa (p ≥ 0.05).",
    corr_undetermined: "Kesimpulan: Korelasi tidak dapat dihitung karena skor komposit tidak bervariasi.",
    viz_title: "📊 Visualisasi Distribusi dan Hubungan X_total & Y_total",
    hist_x_title: "Histogram X_total (Penggunaan AI Tools)",
    hist_y_title: "Histogram Y_total (Efektivitas Belajar)",
    hist_bin_label: "Interval",
    hist_ylabel: "Frekuensi",
    scatter_title: "Scatter Plot: X_total vs Y_total",
    scatter_xlabel: "X_total (Penggunaan AI Tools)",
    scatter_ylabel: "Y_total (Efektivitas Belajar)",
    export_written: "Data dengan skor komposit disimpan ke",
    report_written: "Laporan disimpan ke",
};

static ENGLISH: Strings = Strings {
    app_title: "📊 Analysis of the Impact of AI Tools Usage on Students' Learning Effectiveness",
    page_overview: "Overview & Data",
    page_desc: "Descriptive Statistics",
    page_reliability: "Reliability & Normality",
    page_corr: "Correlation & Visualization",
    generated_at: "Generated at",
    source_label: "Data source",
    preview_title: "👀 Data Preview (first 5 rows)",
    missing_cols_error: "Some required columns are missing in the CSV.",
    missing_cols_hint: "Make sure the question texts in Google Forms are not changed when exporting the CSV.",
    missing_x_label: "Missing X columns (AI Tools)",
    missing_y_label: "Missing Y columns (Learning Effectiveness)",
    respondent_before_clean: "Number of respondents before cleaning:",
    respondent_after_clean: "Number of respondents after cleaning (min 18/20 items filled):",
    no_valid_resp: "No respondents met the valid criteria (>=18 items answered).",
    desc_item_title: "📌 Descriptive Statistics — Item-level",
    desc_comp_title: "📌 Descriptive Statistics — Composite Scores (X_total & Y_total)",
    reliability_title: "🧪 Reliability (Cronbach's Alpha)",
    alpha_x_label: "α for AI Tools Usage (X):",
    alpha_y_label: "α for Learning Effectiveness (Y):",
    undefined: "undefined",
    normality_title: "🧪 Normality Test (Shapiro-Wilk) on X_total and Y_total",
    normality_x_label: "X_total",
    normality_y_label: "Y_total",
    statistic_failed: "Could not be computed",
    corr_title: "📈 Correlation between AI Usage (X_total) and Learning Effectiveness (Y_total)",
    corr_method_pearson: "Correlation method: **Pearson Correlation** (data are normal).",
    corr_method_spearman: "Correlation method: **Spearman Rank Correlation** (data are not normal).",
    corr_coef_label: "Correlation coefficient (r):",
    p_value_label: "p-value:",
    corr_sig: "Conclusion: There is a **significant** relationship between AI tools usage and students' learning effectiveness (p < 0.05).",
    corr_nonsig: "Conclusion: There is **no significant** relationship between AI tools usage and students' learning effectiveness (p ≥ 0.05).",
    corr_undetermined: "Conclusion: The correlation is undefined because a composite score does not vary.",
    viz_title: "📊 Distribution and Relationship of X_total & Y_total",
    hist_x_title: "Histogram of X_total (AI Tools Usage)",
    hist_y_title: "Histogram of Y_total (Learning Effectiveness)",
    hist_bin_label: "Bin",
    hist_ylabel: "Frequency",
    scatter_title: "Scatter Plot: X_total vs Y_total",
    scatter_xlabel: "X_total (AI Tools Usage)",
    scatter_ylabel: "Y_total (Learning Effectiveness)",
    export_written: "Data with composite scores written to",
    report_written: "Report written to",
};

pub fn strings(lang: Lang) -> &'static Strings {
    match lang {
        Lang::Id => &INDONESIAN,
        Lang::En => &ENGLISH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indonesian_is_the_default() {
        assert_eq!(Lang::default(), Lang::Id);
        assert_eq!(strings(Lang::default()).undefined, "tidak terdefinisi");
    }

    #[test]
    fn tables_differ_by_language() {
        assert_ne!(strings(Lang::Id).corr_sig, strings(Lang::En).corr_sig);
        assert_eq!(strings(Lang::En).hist_ylabel, "Frequency");
    }
}
