//! Validate the WGSL shader sources with naga.
//!
//! Catches shader syntax and type errors without needing a GPU.

const DOTS: &str = include_str!("../src/gpu/dots.wgsl");
const LINKS: &str = include_str!("../src/gpu/links.wgsl");

fn validate(name: &str, source: &str) {
    let module = naga::front::wgsl::parse_str(source)
        .unwrap_or_else(|e| panic!("{name}: WGSL parse error: {e}"));

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .unwrap_or_else(|e| panic!("{name}: WGSL validation error: {e:?}"));
}

#[test]
fn dots_shader_is_valid() {
    validate("dots.wgsl", DOTS);
}

#[test]
fn links_shader_is_valid() {
    validate("links.wgsl", LINKS);
}

#[test]
fn shaders_declare_both_entry_points() {
    for source in [DOTS, LINKS] {
        assert!(source.contains("fn vs_main"));
        assert!(source.contains("fn fs_main"));
    }
}
