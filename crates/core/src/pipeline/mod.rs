pub mod render_overlay_use_case;
