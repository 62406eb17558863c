//! # Stackviz guide (v0.1.0)
//!
//! A short, end-to-end walkthrough of stackviz's architecture and public
//! API. If you are looking for copy/paste commands, start with the
//! repository `README.md`; if you are implementing new scenes or backends,
//! start here.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`Scene`](crate::Scene): one authored animation — titles, an optional
//!   stack panel, and a declarative [`StackScript`](crate::StackScript)
//! - [`StackModel`](crate::StackModel): the LIFO element sequence driving
//!   placement; only the last element may ever be removed
//! - [`StackLayout`](crate::StackLayout): pure placement arithmetic for
//!   element slots and the stack pointer
//! - [`Timeline`](crate::Timeline): the compiled, ordered list of
//!   [`Directive`](crate::Directive)s — the only thing an external
//!   rendering engine ever sees
//! - [`SceneBackend`](crate::SceneBackend): the engine-side trait that
//!   executes directives, strictly in order
//!
//! The pipeline is explicitly staged:
//!
//! 1. Author or load a scene: [`scene_by_name`](crate::scene_by_name)
//! 2. Compile the script into directives: [`compile_scene`](crate::compile_scene)
//! 3. Execute directives: [`play`](crate::play) against a `SceneBackend`
//!
//! ---
//!
//! ## "No drawing in the core" (and why)
//!
//! Rendering, video encoding, font handling, and interpolation belong to an
//! external engine. The core stays deterministic and testable by emitting
//! pure data: a directive says *"place a labeled box at point P with color
//! C"* or *"move node N to point P over 1.2 s"*, never how to rasterize it.
//! [`RecordingBackend`](crate::RecordingBackend) captures directives so
//! tests can assert on exact placement without any renderer.
//!
//! Coordinates are scene units with y growing upward, origin at the canvas
//! center; the frame's `origin` is the bottom-center of the stack outline.
//! Pixel mapping is the engine's concern, configured through
//! [`RenderConfig`](crate::RenderConfig) (4K @ 60 by default; invalid
//! configurations fail compilation, they are never silently defaulted).
//!
//! ---
//!
//! ## Compiling and playing a built-in scene
//!
//! ```rust
//! use stackviz::{RecordingBackend, compile_scene, play, scene_by_name};
//!
//! # fn main() -> stackviz::StackVizResult<()> {
//! let scene = scene_by_name("stack_lifo").expect("built-in scene");
//! let timeline = compile_scene(&scene)?;
//!
//! let mut backend = RecordingBackend::default();
//! play(&timeline, &mut backend)?;
//! assert_eq!(backend.applied.len(), timeline.directives.len());
//! # Ok(())
//! # }
//! ```
//!
//! The same timeline serializes to JSON (`stackviz timeline --scene
//! stack_lifo`) for engines that consume it out of process.
//!
//! ---
//!
//! ## Scripts are data
//!
//! A scene's behavior is a list of `{op, payload}` steps
//! ([`ScriptStep`](crate::ScriptStep)): push, pop, captions, code panels,
//! waits, a finale. The compiler owns the choreography — entry below the
//! frame, slot targeting via [`StackLayout`](crate::StackLayout), pointer
//! tracking, highlight-then-exit on pop — so scripts stay declarative.
//! Scripts are validated by simulating element counts before any directive
//! is emitted: popping past the initial population is a scripting bug and
//! fails compilation with a script error.
