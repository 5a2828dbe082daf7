//! Kinematics and dynamics calculators.

use crate::dom::Markup;
use crate::equations::physics::{self, ProjectileInput, STANDARD_GRAVITY};
use crate::numeric::to_fixed;
use crate::registry::{Calculator, CalculatorMeta};

use super::layout::{calculate_button, layout, line, number_input, number_input_with, on_calculate, read_numbers};
use super::Definition;

const PROJECTILE_EDU: &str = r#"
<div class="educational-section">
    <p>A projectile moves along a curved path with gravity as the only force. Its horizontal and vertical motion can be treated separately.</p>
    <p>Horizontally the velocity never changes:</p>
    \[ x(t) = v_0 \cos(\theta)\, t \]
    <p>Vertically gravity slows the rise and speeds the fall:</p>
    \[ y(t) = h_0 + v_0 \sin(\theta)\, t - \tfrac{1}{2} g t^2 \]
    <ul>
        <li>\( v_0 \): launch speed</li>
        <li>\( \theta \): launch angle above the horizontal</li>
        <li>\( h_0 \): launch height</li>
        <li>\( g \approx 9.81 \, \text{m/s}^2 \)</li>
    </ul>
</div>
"#;

const FREE_FALL_EDU: &str = r#"
<div class="educational-section">
    <p>An object in free fall is pulled by gravity alone. Dropped from rest at height \( h \), it lands after</p>
    \[ t = \sqrt{\frac{2h}{g}} \]
    <p>moving at</p>
    \[ v = g t = \sqrt{2 g h} \]
</div>
"#;

const FORCE_EDU: &str = r#"
<div class="educational-section">
    <p>Newton's second law relates the net force on a body to its mass and acceleration:</p>
    \[ F = m a \]
    <p>With mass in kilograms and acceleration in m/s², the force comes out in newtons (N).</p>
</div>
"#;

const GRAVITATION_EDU: &str = r#"
<div class="educational-section">
    <p>Any two masses attract each other. Newton's law of universal gravitation gives the size of that pull:</p>
    \[ F = G \frac{m_1 m_2}{r^2} \]
    <ul>
        <li>\( G = 6.67430 \times 10^{-11} \, \text{N} \cdot \text{m}^2/\text{kg}^2 \)</li>
        <li>\( m_1, m_2 \): the two masses</li>
        <li>\( r \): distance between their centres</li>
    </ul>
</div>
"#;

/// `label <strong>value unit</strong>` lines, the last without a break.
fn lines(rows: &[(&str, String)]) -> Vec<Markup> {
    let mut out: Vec<Markup> = rows.iter().flat_map(|(label, value)| line(label, value.clone())).collect();
    out.pop();
    out
}

// ============================================================================
// Kinematics
// ============================================================================

pub fn projectile() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "projectile-motion-calculator",
            "Projectile Motion",
            "Calculate key parameters of projectile motion.",
        ),
        |def| {
            layout(
                def.meta(),
                "projectile-result",
                def.has_education(),
                vec![
                    number_input("initial-velocity", "Initial Velocity (m/s):", "Enter initial velocity"),
                    number_input("launch-angle", "Launch Angle (degrees):", "Enter angle"),
                    number_input_with("initial-height", "Initial Height (m):", "0"),
                    calculate_button("calculate-projectile", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-projectile", "projectile-result", |doc| {
                let [velocity, angle_deg, height] =
                    read_numbers(doc, ["initial-velocity", "launch-angle", "initial-height"])?;
                let r = physics::projectile(&ProjectileInput {
                    velocity,
                    angle_deg,
                    height,
                })?;
                Ok(lines(&[
                    ("Max Height: ", format!("{} m", to_fixed(r.max_height, 2))),
                    ("Time to Max: ", format!("{} s", to_fixed(r.time_to_max, 2))),
                    ("Flight Time: ", format!("{} s", to_fixed(r.flight_time, 2))),
                    ("Range: ", format!("{} m", to_fixed(r.range, 2))),
                ]))
            })
        },
    )
    .with_education(PROJECTILE_EDU)
}

pub fn free_fall() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "free-fall-calculator",
            "Free Fall Calculator",
            "Calculate parameters for objects falling under gravity.",
        ),
        |def| {
            layout(
                def.meta(),
                "free-fall-result",
                def.has_education(),
                vec![
                    number_input("free-fall-height", "Height (m):", "Enter initial height"),
                    number_input_with("gravity-value", "Gravity (m/s²):", &STANDARD_GRAVITY.to_string()),
                    calculate_button("calculate-free-fall", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-free-fall", "free-fall-result", |doc| {
                let [height, gravity] = read_numbers(doc, ["free-fall-height", "gravity-value"])?;
                let r = physics::free_fall(height, gravity)?;
                Ok(lines(&[
                    ("Fall Time: ", format!("{} s", to_fixed(r.time, 2))),
                    ("Impact Velocity: ", format!("{} m/s", to_fixed(r.impact_velocity, 2))),
                ]))
            })
        },
    )
    .with_education(FREE_FALL_EDU)
}

// ============================================================================
// Dynamics
// ============================================================================

pub fn force() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "force-calculator",
            "Force Calculator",
            "Calculate force using Newton's Second Law: F = ma.",
        ),
        |def| {
            layout(
                def.meta(),
                "force-result",
                def.has_education(),
                vec![
                    number_input("mass", "Mass (kg):", "Enter mass"),
                    number_input("acceleration", "Acceleration (m/s²):", "Enter acceleration"),
                    calculate_button("calculate-force", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-force", "force-result", |doc| {
                let [mass, acceleration] = read_numbers(doc, ["mass", "acceleration"])?;
                let f = physics::force(mass, acceleration);
                Ok(lines(&[("Force: ", format!("{} N", to_fixed(f, 2)))]))
            })
        },
    )
    .with_education(FORCE_EDU)
}

pub fn gravitational_force() -> Definition {
    Definition::new(
        CalculatorMeta::new(
            "gravitational-force-calculator",
            "Gravitational Force",
            "Calculate gravitational force between two masses.",
        ),
        |def| {
            layout(
                def.meta(),
                "gravity-result",
                def.has_education(),
                vec![
                    number_input("mass1", "Mass 1 (kg):", "Enter mass 1"),
                    number_input("mass2", "Mass 2 (kg):", "Enter mass 2"),
                    number_input("distance", "Distance (m):", "Enter distance"),
                    calculate_button("calculate-gravity", "Calculate"),
                ],
            )
        },
        |doc, scope| {
            on_calculate(doc, scope, "calculate-gravity", "gravity-result", |doc| {
                let [m1, m2, r] = read_numbers(doc, ["mass1", "mass2", "distance"])?;
                let f = physics::gravitational_force(m1, m2, r)?;
                Ok(lines(&[("Force: ", format!("{} N", physics::format_force(f)))]))
            })
        },
    )
    .with_education(GRAVITATION_EDU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::loader::MountScope;

    fn mount(def: &Definition) -> (Document, MountScope) {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_children(root, [def.render()]).unwrap();
        let mut scope = MountScope::new();
        def.bind(&mut doc, &mut scope).unwrap();
        (doc, scope)
    }

    fn text(doc: &Document, id: &str) -> String {
        doc.text_content(doc.require(id).unwrap())
    }

    fn click(doc: &mut Document, id: &str) {
        let node = doc.require(id).unwrap();
        doc.click(node);
    }

    #[test]
    fn test_projectile_report() {
        let (mut doc, _scope) = mount(&projectile());
        assert_eq!(doc.value_of("initial-height").unwrap(), "0");
        doc.set_value_of("initial-velocity", "0").unwrap();
        doc.set_value_of("launch-angle", "0").unwrap();
        doc.set_value_of("initial-height", "19.62").unwrap();
        click(&mut doc, "calculate-projectile");
        assert_eq!(
            text(&doc, "projectile-result"),
            "Max Height: 19.62 mTime to Max: 0.00 sFlight Time: 2.00 sRange: 0.00 m"
        );
    }

    #[test]
    fn test_projectile_validation() {
        let (mut doc, _scope) = mount(&projectile());
        click(&mut doc, "calculate-projectile");
        assert_eq!(text(&doc, "projectile-result"), "Please enter valid numbers");
        doc.set_value_of("initial-velocity", "-5").unwrap();
        doc.set_value_of("launch-angle", "30").unwrap();
        click(&mut doc, "calculate-projectile");
        assert_eq!(text(&doc, "projectile-result"), "Initial velocity must be non-negative");
    }

    #[test]
    fn test_free_fall_defaults_to_standard_gravity() {
        let (mut doc, _scope) = mount(&free_fall());
        assert_eq!(doc.value_of("gravity-value").unwrap(), "9.81");
        doc.set_value_of("free-fall-height", "19.62").unwrap();
        click(&mut doc, "calculate-free-fall");
        assert_eq!(text(&doc, "free-fall-result"), "Fall Time: 2.00 sImpact Velocity: 19.62 m/s");
        doc.set_value_of("gravity-value", "0").unwrap();
        click(&mut doc, "calculate-free-fall");
        assert_eq!(text(&doc, "free-fall-result"), "Invalid height or gravity");
    }

    #[test]
    fn test_force() {
        let (mut doc, _scope) = mount(&force());
        doc.set_value_of("mass", "10").unwrap();
        doc.set_value_of("acceleration", "9.81").unwrap();
        click(&mut doc, "calculate-force");
        assert_eq!(text(&doc, "force-result"), "Force: 98.10 N");
    }

    #[test]
    fn test_gravitational_force_formats_small_values() {
        let (mut doc, _scope) = mount(&gravitational_force());
        doc.set_value_of("mass1", "1").unwrap();
        doc.set_value_of("mass2", "1").unwrap();
        doc.set_value_of("distance", "1").unwrap();
        click(&mut doc, "calculate-gravity");
        assert_eq!(text(&doc, "gravity-result"), "Force: 6.6743e-11 N");
        doc.set_value_of("distance", "0").unwrap();
        click(&mut doc, "calculate-gravity");
        assert_eq!(text(&doc, "gravity-result"), "Values must be positive");
    }
}
