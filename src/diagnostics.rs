/// Write a tagged diagnostic line: browser console on wasm, stderr elsewhere.
#[inline]
pub fn log_info(scope: &str, message: &str) {
    emit(scope, message, false);
}

/// Same as [`log_info`] but routed to the error channel.
#[inline]
pub fn log_error(scope: &str, message: &str) {
    emit(scope, message, true);
}

fn format_line(scope: &str, message: &str) -> String {
    if message.trim().is_empty() {
        format!("[{scope}]")
    } else {
        format!("[{scope}] {message}")
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(scope: &str, message: &str, is_error: bool) {
    let line = format_line(scope, message);
    if is_error {
        web_sys::console::error_1(&line.into());
    } else {
        web_sys::console::log_1(&line.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(scope: &str, message: &str, _is_error: bool) {
    eprintln!("{}", format_line(scope, message));
}

#[cfg(test)]
mod tests {
    use super::format_line;

    #[test]
    fn tags_lines_with_scope() {
        assert_eq!(format_line("player", "started"), "[player] started");
        assert_eq!(format_line("player", "  "), "[player]");
    }
}
