//! Opens an SDL2 window and draws one triangle through the wrappers.
//!
//! `cargo run --example triangle --features sdl2`
use std::{
    ptr::null,
    thread,
    time::{Duration, Instant},
};

use glwrap::{
    config,
    gl,
    gl_check,
    gl_wrappers::{Buffer, BufferTarget, BufferUsage, Program, VertexArray},
    logging::{init_logging, LoggingConfig},
    program_utils::make_program_compat,
    viewport, ColorRgba, GlApi,
};
use sdl2::{event::WindowEvent, keyboard::Keycode, video};

/// Soft cap: we may sleep a little less than this allows.
const SOFT_FPS_CAP: u64 = 240;
const DURATION_BETWEEN_FRAMES: Duration = Duration::from_micros(1_000_000 / SOFT_FPS_CAP);

const START_WIDTH: u32 = 800;
const START_HEIGHT: u32 = 600;

const VERTEX_SHADER: &str = "
COMPAT_ATTRIB_LOCATION(0) vec2 a_position;
COMPAT_OUT vec2 v_uv;
void main() {
    v_uv = a_position + vec2(0.5);
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

const FRAGMENT_SHADER: &str = "
COMPAT_IN vec2 v_uv;
uniform vec4 u_tint;
void main() {
    COMPAT_FRAG_COLOR = vec4(v_uv, 0.5, 1.0) * u_tint;
}
";

const TRIANGLE: [[f32; 2]; 3] = [[-0.5, -0.5], [0.5, -0.5], [0.0, 0.5]];

fn main() -> Result<(), String> {
    init_logging(LoggingConfig::default());

    let (sdl_ctx, video_ctx, window) = init_sdl()?;
    let _gl_ctx = window.gl_create_context()?;
    if !glwrap::loader::load_with_sdl2(&video_ctx) {
        return Err("could not load OpenGL".to_owned());
    }
    let (major, minor) = config::query_context_version();
    log::info!("context reports {major}.{minor}, built for {:?}", config::CONTEXT);

    let mut program = make_program_compat("triangle", VERTEX_SHADER, FRAGMENT_SHADER)
        .map_err(|error| error.to_string())?;
    let position = program
        .attrib_location("a_position")
        .ok_or("a_position is not active")?;

    let vertex_array = VertexArray::new();
    vertex_array.bind();
    let mut vertices = Buffer::new(BufferTarget::Array);
    vertices.bind();
    vertices.set_data(&TRIANGLE, BufferUsage::StaticDraw);
    unsafe {
        gl_check!(gl::EnableVertexAttribArray(position.index()));
        gl_check!(gl::VertexAttribPointer(
            position.index(),
            2,
            gl::FLOAT,
            gl::FALSE,
            0,
            null()
        ));
    }

    let background = ColorRgba::from_uint(u32::from_ne_bytes([24, 24, 32, 255]));
    let mut event_pump = sdl_ctx.event_pump()?;
    let mut frame_width = START_WIDTH;
    let mut frame_height = START_HEIGHT;
    let mut frametimes = Vec::with_capacity(SOFT_FPS_CAP as usize);
    let mut last_report = Instant::now();
    let started = Instant::now();

    'going: loop {
        let loop_start = Instant::now();
        for event in event_pump.poll_iter() {
            use sdl2::event::Event as Ev;
            match event {
                Ev::Quit { .. }
                | Ev::KeyDown {
                    keycode: Some(Keycode::ESCAPE),
                    ..
                } => break 'going,
                Ev::Window {
                    window_id,
                    win_event: WindowEvent::Resized(width, height),
                    ..
                } if window_id == window.id() => {
                    frame_width = width.max(0) as u32;
                    frame_height = height.max(0) as u32;
                }
                _ => {}
            }
        }

        viewport::set_size(frame_width, frame_height);
        let [r, g, b, a] = *background.as_array();
        unsafe {
            gl_check!(gl::ClearColor(r, g, b, a));
            gl_check!(gl::Clear(gl::COLOR_BUFFER_BIT));
        }

        let pulse = 0.75 + 0.25 * started.elapsed().as_secs_f32().sin();
        program.use_program();
        let tint = ColorRgba::rgb(pulse, pulse, 1.0);
        program.set_uniform_by_name("u_tint", *tint.as_array());
        vertex_array.bind();
        unsafe { gl_check!(gl::DrawArrays(gl::TRIANGLES, 0, TRIANGLE.len() as i32)) };

        window.gl_swap_window();

        thread::sleep(DURATION_BETWEEN_FRAMES.saturating_sub(loop_start.elapsed()));
        frametimes.push(loop_start.elapsed().as_secs_f64());

        if last_report.elapsed().as_secs() >= 1 {
            let average = frametimes.iter().sum::<f64>() / frametimes.len() as f64;
            log::debug!(
                "frametime: {average:0.8}, FPS: {:0.8}, frames counted: {:05}",
                1. / average,
                frametimes.len()
            );
            frametimes.clear();
            last_report = Instant::now();
        }
    }

    VertexArray::unbind();
    Program::unuse();
    Ok(())
}

fn init_sdl() -> Result<(sdl2::Sdl, sdl2::VideoSubsystem, video::Window), String> {
    let sdl_ctx = sdl2::init()?;

    let video_ctx = sdl_ctx.video()?;
    video_ctx.gl_load_library_default()?;

    let gl_attr = video_ctx.gl_attr();
    gl_attr.set_context_major_version(config::CONTEXT.major);
    gl_attr.set_context_minor_version(config::CONTEXT.minor);
    match config::CONTEXT.api {
        GlApi::OpenGl => {
            gl_attr.set_context_flags().forward_compatible().set();
            gl_attr.set_context_profile(video::GLProfile::Core);
        }
        GlApi::OpenGlEs => gl_attr.set_context_profile(video::GLProfile::GLES),
    }

    let window = video_ctx
        .window("glwrap triangle", START_WIDTH, START_HEIGHT)
        .position_centered()
        .resizable()
        .opengl()
        .build()
        .map_err(|e| e.to_string())?;

    Ok((sdl_ctx, video_ctx, window))
}
