//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `gracechms_core` linkage.
//! - Print how each argument location resolves, deterministically.

fn main() {
    println!("gracechms_core ping={}", gracechms_core::ping());
    println!("gracechms_core version={}", gracechms_core::core_version());

    for location in std::env::args().skip(1) {
        let resolved = gracechms_core::resolve(&location);
        let params = resolved
            .params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "route location={location} view={:?} params=[{params}]",
            resolved.view
        );
    }
}
