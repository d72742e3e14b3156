//! Shader graph integration tests.
//!
//! Covers registry construction, the binding invariant, validation
//! idempotence, cutout compositing and concurrent evaluation.

mod common;

use std::sync::Arc;

use rstest::rstest;

use common::{hit, render_context, solid_color};
use prism_core::math::{Vec3f, Vec4f};
use prism_render::{
    AttributeReader, Channel, ChannelSet, ConstantTexture, Cutout, Pixel, RayShader,
    RayShaderContext, RenderContext, RenderSettings, ShaderError, ShaderRegistry, Severity,
};

// ============================================================================
// Registry and binding invariant
// ============================================================================

#[rstest]
#[case::attribute_reader("AttributeReader")]
#[case::cutout("Cutout")]
#[case::cutout_map("CutoutMap")]
#[case::ambient_volume("AmbientVolume")]
#[case::uv_texture("UVTexture")]
fn test_binding_count_matches_input_knobs(#[case] class_name: &str) {
    let registry = ShaderRegistry::with_builtin_shaders();
    let shader = registry.create(class_name).unwrap();
    assert_eq!(shader.class_name(), class_name);
    assert_eq!(shader.num_inputs(), shader.input_knob_definitions().len());
    for slot in 0..shader.num_inputs() {
        assert!(!shader.input_binding(slot).is_active());
    }
    assert!(matches!(
        shader.try_input_binding(shader.num_inputs()),
        Err(ShaderError::IndexOutOfRange { .. })
    ));
}

#[rstest]
#[case::attribute_reader("AttributeReader")]
#[case::cutout("Cutout")]
#[case::cutout_map("CutoutMap")]
#[case::ambient_volume("AmbientVolume")]
#[case::uv_texture("UVTexture")]
fn test_validate_is_idempotent(#[case] class_name: &str, #[values(false, true)] for_real: bool) {
    let rtx = render_context(&[0.0]);
    let mut shader = ShaderRegistry::with_builtin_shaders()
        .create(class_name)
        .unwrap();

    shader.validate_shader(for_real, &rtx);
    let first = (shader.output_channels(), shader.texture_channels());
    shader.validate_shader(for_real, &rtx);
    let second = (shader.output_channels(), shader.texture_channels());

    assert_eq!(first, second);
    assert!(rtx.diagnostics().is_empty());
}

#[test]
fn test_unknown_shader_type() {
    let registry = ShaderRegistry::with_builtin_shaders();
    let err = registry.create("zprPreviewSurface").unwrap_err();
    assert_eq!(err.to_string(), "Unknown shader type: zprPreviewSurface");
}

#[test]
fn test_cutout_output_knobs() {
    let shader = RayShader::from(Cutout::new());
    let names: Vec<_> = shader
        .output_knob_definitions()
        .iter()
        .map(|k| k.name)
        .collect();
    assert_eq!(names, vec!["surface", "rgba", "rgb", "r", "g", "b", "a"]);
    assert_eq!(shader.input_knob_definitions()[0].name, "bg");
}

// ============================================================================
// Cutout compositing
// ============================================================================

#[test]
fn test_cutout_keeps_background_alpha_only() {
    let rtx = render_context(&[0.0]);
    let bg = solid_color(&rtx, Vec4f::new(0.2, 0.3, 0.4, 0.7));

    let mut cutout = RayShader::from(Cutout::new());
    cutout.bind_shader(Cutout::BG, bg).unwrap();
    let cutout = cutout.validated(&rtx);
    assert_eq!(cutout.output_channels(), ChannelSet::from(Channel::MASK));

    let mut out = Pixel::new();
    out[Channel::Z] = 12.0;
    cutout.evaluate_surface(&hit(10, 20), &mut out);

    assert_eq!(out.rgb(), Vec3f::zeros());
    assert!((out.alpha() - 0.7).abs() < 1e-6);
    assert_eq!(out[Channel::MASK], 1.0);
    assert_eq!(
        out.nonzero_channels(),
        ChannelSet::from(Channel::ALPHA).with(Channel::MASK)
    );
}

#[test]
fn test_unbound_cutout_is_opaque() {
    let rtx = render_context(&[0.0]);
    let cutout = RayShader::from(Cutout::new()).validated(&rtx);

    let mut out = Pixel::new();
    cutout.evaluate_surface(&hit(0, 0), &mut out);

    assert_eq!(out.rgba(), Vec4f::new(0.0, 0.0, 0.0, 1.0));
    assert_eq!(out[Channel::MASK], 1.0);
}

#[rstest]
#[case::same_channel(Channel::MASK, Channel::MASK)]
#[case::configured_differs(Channel::MASK, Channel::FIRST_CUSTOM)]
#[case::custom_configured(Channel::FIRST_CUSTOM, Channel::MASK)]
fn test_cutout_channel_tie_break(#[case] configured: Channel, #[case] contextual: Channel) {
    let rtx = render_context(&[0.0]);
    let cutout = RayShader::from(Cutout::new().with_cutout_channel(configured)).validated(&rtx);

    let mut out = Pixel::new();
    cutout.evaluate_surface(&hit(1, 1).with_cutout_channel(contextual), &mut out);

    // Only alpha and the configured channel survive, and it holds exactly 1.
    assert_eq!(
        out.nonzero_channels(),
        ChannelSet::from(Channel::ALPHA).with(configured)
    );
    assert_eq!(out[configured], 1.0);
}

#[rstest]
#[case::matching_custom(Channel::FIRST_CUSTOM, Channel::FIRST_CUSTOM, Channel::FIRST_CUSTOM)]
#[case::configured_wins(Channel::FIRST_CUSTOM, Channel::MASK, Channel::MASK)]
#[case::matching_far_custom(
    Channel::new(40).unwrap(),
    Channel::new(40).unwrap(),
    Channel::new(40).unwrap()
)]
fn test_cutout_uses_render_cutout_channel(
    #[case] render_channel: Channel,
    #[case] configured: Channel,
    #[case] written: Channel,
) {
    common::init_logging();
    let rtx = RenderContext::new(RenderSettings {
        cutout_channel: render_channel,
        ..Default::default()
    });
    let cutout = RayShader::from(Cutout::new().with_cutout_channel(configured)).validated(&rtx);

    let stx = RayShaderContext::for_render(&rtx, 3, 4);
    assert_eq!(stx.cutout_channel, render_channel);

    let mut out = Pixel::new();
    cutout.evaluate_surface(&stx, &mut out);

    assert_eq!(
        out.nonzero_channels(),
        ChannelSet::from(Channel::ALPHA).with(written)
    );
    assert_eq!(out[written], 1.0);
}

#[rstest]
#[case::partial(0.25, 0.25)]
#[case::over_range(1.7, 1.0)]
#[case::negative(-0.5, 0.0)]
fn test_texture_modulated_cutout(#[case] map_value: f32, #[case] expected: f32) {
    let rtx = render_context(&[0.0]);
    let mut cutout = RayShader::from(Cutout::texture_modulated());
    cutout
        .bind_texture(
            Cutout::MAP,
            Arc::new(ConstantTexture(Vec4f::new(map_value, 0.0, 0.0, 1.0))),
        )
        .unwrap();
    let cutout = cutout.validated(&rtx);
    assert_eq!(cutout.texture_channels(), ChannelSet::RGBA);

    let mut out = Pixel::new();
    cutout.evaluate_surface(&hit(0, 0), &mut out);

    assert_eq!(out[Channel::MASK], expected);
    assert_eq!(out.alpha(), 1.0);
}

#[test]
fn test_cutout_texture_background_is_reported() {
    let rtx = render_context(&[0.0]);
    let mut cutout = RayShader::from(Cutout::new());
    cutout
        .bind_texture(
            Cutout::BG,
            Arc::new(ConstantTexture(Vec4f::new(1.0, 1.0, 1.0, 0.5))),
        )
        .unwrap();
    let cutout = cutout.validated(&rtx);

    let entries = rtx.diagnostics().snapshot();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].severity, Severity::Warning);

    // Treated as unbound.
    let mut out = Pixel::new();
    cutout.evaluate_surface(&hit(0, 0), &mut out);
    assert_eq!(out.alpha(), 1.0);
}

// ============================================================================
// Attribute reader
// ============================================================================

#[rstest]
#[case::origin(0, 0)]
#[case::far_pixel(1919, 1079)]
fn test_attribute_reader_stub(#[case] x: i32, #[case] y: i32) {
    let rtx = render_context(&[0.0]);
    let reader = RayShader::from(AttributeReader::new().with_attribute("Cd", "")).validated(&rtx);
    assert!(reader.output_channels().is_empty());

    let mut out = Pixel::new();
    out.set_rgba(0.5, 0.5, 0.5, 0.5);
    reader.evaluate_surface(&hit(x, y), &mut out);
    assert_eq!(out.rgba(), Vec4f::new(0.0, 0.0, 0.0, 1.0));
}

// ============================================================================
// Concurrency
// ============================================================================

fn shade_rows(shader: &RayShader, rows: std::ops::Range<i32>) -> Vec<Pixel> {
    rows.flat_map(|y| (0..16).map(move |x| (x, y)))
        .map(|(x, y)| {
            let mut out = Pixel::new();
            shader.evaluate_shading(&hit(x, y), &mut out);
            out
        })
        .collect()
}

#[test]
fn test_concurrent_evaluation_matches_serial() {
    let rtx: RenderContext = render_context(&[0.0]);
    let bg = solid_color(&rtx, Vec4f::new(0.2, 0.3, 0.4, 0.7));
    let mut cutout = RayShader::from(Cutout::new());
    cutout.bind_shader(Cutout::BG, bg).unwrap();
    let cutout = cutout.validated(&rtx);

    let serial = shade_rows(&cutout, 0..8);

    let parallel: Vec<Pixel> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let cutout = Arc::clone(&cutout);
                s.spawn(move || shade_rows(&cutout, i * 2..i * 2 + 2))
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("render thread panicked"))
            .collect()
    });

    assert_eq!(serial, parallel);
}
