//! Named CSS presets for page templates and element animations.

/// Page-wide template stylesheets, keyed by name.
pub const TEMPLATE_NAMES: &[&str] = &["modern", "professional", "minimal", "colorful"];

/// Stylesheet for a template preset; unknown names yield an empty sheet.
pub fn template_css(name: &str) -> &'static str {
    match name {
        "modern" => {
            "\nbody { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; }\n\
             h1, h2, h3 { color: #2c3e50; margin-bottom: 1rem; }\n\
             p { margin-bottom: 1rem; }\n\
             .container { max-width: 1200px; margin: 0 auto; padding: 0 20px; }\n\
             .btn { background: #3498db; color: white; padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; }\n\
             .card { background: white; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); padding: 20px; margin: 20px 0; }\n"
        }
        "professional" => {
            "\nbody { font-family: 'Georgia', serif; line-height: 1.8; color: #2c3e50; background: #f8f9fa; }\n\
             h1, h2, h3 { color: #1a252f; border-bottom: 2px solid #3498db; padding-bottom: 10px; }\n\
             p { text-align: justify; }\n\
             .container { max-width: 1000px; margin: 0 auto; padding: 20px; background: white; box-shadow: 0 0 20px rgba(0,0,0,0.1); }\n\
             .btn { background: #2c3e50; color: white; padding: 12px 24px; border: none; border-radius: 3px; font-weight: bold; }\n"
        }
        "minimal" => {
            "\nbody { font-family: 'Arial', sans-serif; line-height: 1.6; color: #333; background: white; }\n\
             h1, h2, h3 { color: #000; font-weight: 300; }\n\
             p { color: #666; }\n\
             .container { max-width: 800px; margin: 0 auto; padding: 40px 20px; }\n\
             .btn { background: #000; color: white; padding: 10px 20px; border: none; }\n"
        }
        "colorful" => {
            "\nbody { font-family: 'Comic Sans MS', cursive; line-height: 1.6; color: #333; background: linear-gradient(45deg, #ff6b6b, #4ecdc4); }\n\
             h1, h2, h3 { color: #fff; text-shadow: 2px 2px 4px rgba(0,0,0,0.3); }\n\
             p { color: #fff; text-shadow: 1px 1px 2px rgba(0,0,0,0.3); }\n\
             .container { max-width: 1200px; margin: 0 auto; padding: 20px; }\n\
             .btn { background: #ffd93d; color: #333; padding: 12px 24px; border: none; border-radius: 25px; font-weight: bold; }\n"
        }
        _ => "",
    }
}

pub const ANIMATION_NAMES: &[&str] = &["fade", "slide", "bounce", "rotate"];

/// Keyframes plus the class that triggers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationPreset {
    pub class: &'static str,
    pub css: &'static str,
}

pub fn animation(name: &str) -> Option<AnimationPreset> {
    let preset = match name {
        "fade" => AnimationPreset {
            class: "fade-in",
            css: "\n.fade-in { animation: fadeIn 1s ease-in; }\n\
                  @keyframes fadeIn { from { opacity: 0; } to { opacity: 1; } }\n",
        },
        "slide" => AnimationPreset {
            class: "slide-in",
            css: "\n.slide-in { animation: slideIn 0.8s ease-out; }\n\
                  @keyframes slideIn { from { transform: translateX(-100%); } to { transform: translateX(0); } }\n",
        },
        "bounce" => AnimationPreset {
            class: "bounce",
            css: "\n.bounce { animation: bounce 1s ease-in-out; }\n\
                  @keyframes bounce { 0%, 20%, 50%, 80%, 100% { transform: translateY(0); } 40% { transform: translateY(-30px); } 60% { transform: translateY(-15px); } }\n",
        },
        "rotate" => AnimationPreset {
            class: "rotate",
            css: "\n.rotate { animation: rotate 2s linear infinite; }\n\
                  @keyframes rotate { from { transform: rotate(0deg); } to { transform: rotate(360deg); } }\n",
        },
        _ => return None,
    };
    Some(preset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_css() {
        for name in TEMPLATE_NAMES {
            assert!(template_css(name).contains("body {"), "{} is empty", name);
        }
        assert_eq!(template_css("brutalist"), "");
    }

    #[test]
    fn animation_css_defines_its_class() {
        for name in ANIMATION_NAMES {
            let preset = animation(name).unwrap();
            assert!(preset.css.contains(&format!(".{} {{", preset.class)));
            assert!(preset.css.contains("@keyframes"));
        }
        assert!(animation("wobble").is_none());
    }
}
