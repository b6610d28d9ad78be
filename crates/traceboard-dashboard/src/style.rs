use rust_xlsxwriter::{Color, Format};

/// Fill used for header rows across all sheets.
const HEADER_FILL: Color = Color::RGB(0xD9E1F2);

pub(crate) fn header_format() -> Format {
    Format::new().set_bold().set_background_color(HEADER_FILL)
}

pub(crate) fn title_format() -> Format {
    Format::new().set_bold().set_font_size(14)
}

pub(crate) fn percent_format() -> Format {
    Format::new().set_num_format("0.0%")
}
