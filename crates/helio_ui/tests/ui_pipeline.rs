//! Full-pipeline tests: layout, draw command emission and data binding
//! working together through the public API.

use helio_core::math::{PxRectangle, PxSize2D, PxThickness};
use helio_ui::controls::BackgroundWindow;
use helio_ui::{
    BindingMode, ConverterBinding, DataBindingService, DependencyPropertyDefinition, DrawCommand, DrawContext,
    GridDefinition, GridLayout, ItemAlignment, PropertySetResult, PropertyValue, PropertyValueKind, StackLayout,
    UIRenderColor, WindowManager, WindowProperties,
};

#[test]
fn layout_then_draw_emits_screen_space_commands() {
    let mut manager = WindowManager::new();
    let stack = manager
        .add(Box::new(StackLayout::vertical().with_spacing(10)), WindowProperties::stretch())
        .unwrap();
    let top = manager
        .add_child(
            stack,
            Box::new(BackgroundWindow::new(UIRenderColor::BLACK)),
            WindowProperties {
                alignment_x: ItemAlignment::Stretch,
                height: Some(30),
                ..WindowProperties::default()
            },
        )
        .unwrap();
    let bottom = manager
        .add_child(
            stack,
            Box::new(BackgroundWindow::new(UIRenderColor::WHITE)),
            WindowProperties {
                margin: PxThickness::uniform(5),
                width: Some(50),
                height: Some(20),
                ..WindowProperties::default()
            },
        )
        .unwrap();

    manager.perform_layout(PxSize2D::new(200, 100));

    assert_eq!(
        manager.layout_info(top).unwrap().content_rect,
        PxRectangle::new(0, 0, 200, 30)
    );
    // Margin offsets the second child inside its slot.
    assert_eq!(
        manager.layout_info(bottom).unwrap().content_rect,
        PxRectangle::new(5, 45, 50, 20)
    );

    let mut commands = Vec::new();
    let mut ctx = DrawContext::new(&mut commands);
    manager.draw(&mut ctx);

    // Both backgrounds drew a fill at their screen rectangle.
    assert!(commands.contains(&DrawCommand::FillRect {
        rect: PxRectangle::new(0, 0, 200, 30),
        color: UIRenderColor::BLACK,
    }));
    assert!(commands.contains(&DrawCommand::FillRect {
        rect: PxRectangle::new(5, 45, 50, 20),
        color: UIRenderColor::WHITE,
    }));
}

#[test]
fn nested_grid_and_stack_layout_round_trips() {
    let mut manager = WindowManager::new();
    let mut grid = GridLayout::new();
    grid.add_column(GridDefinition::fixed(80));
    grid.add_column(GridDefinition::star(1.0));
    grid.add_row(GridDefinition::star(1.0));
    grid.set_placement(0, 0, 0);
    grid.set_placement(1, 1, 0);

    let grid_id = manager.add(Box::new(grid), WindowProperties::stretch()).unwrap();
    let sidebar = manager
        .add_child(grid_id, Box::new(StackLayout::vertical()), WindowProperties::stretch())
        .unwrap();
    let content = manager
        .add_child(
            grid_id,
            Box::new(BackgroundWindow::new(UIRenderColor::WHITE)),
            WindowProperties::stretch(),
        )
        .unwrap();

    manager.perform_layout(PxSize2D::new(320, 240));
    let first_pass = (
        manager.layout_info(sidebar).unwrap().content_rect,
        manager.layout_info(content).unwrap().content_rect,
    );
    assert_eq!(first_pass.0, PxRectangle::new(0, 0, 80, 240));
    assert_eq!(first_pass.1, PxRectangle::new(80, 0, 240, 240));

    // Re-running layout with identical input is observationally idempotent.
    manager.perform_layout(PxSize2D::new(320, 240));
    assert_eq!(
        first_pass,
        (
            manager.layout_info(sidebar).unwrap().content_rect,
            manager.layout_info(content).unwrap().content_rect,
        )
    );

    // A new window size invalidates and relayouts.
    manager.perform_layout(PxSize2D::new(400, 240));
    assert_eq!(
        manager.layout_info(content).unwrap().content_rect,
        PxRectangle::new(80, 0, 320, 240)
    );
}

#[test]
fn binding_sweep_survives_a_bad_conversion() {
    let mut service = DataBindingService::new();
    let def = DependencyPropertyDefinition::new("Panel", "Value", PropertyValueKind::F32);
    let source = service.create_property(def, PropertyValue::F32(1.0)).unwrap();
    let good = service.create_property(def, PropertyValue::F32(0.0)).unwrap();
    let bad = service.create_property(def, PropertyValue::F32(0.0)).unwrap();

    fn reject(_: &PropertyValue) -> Option<PropertyValue> {
        None
    }

    service.bind(good, &[source], ConverterBinding::Direct, BindingMode::OneWay).unwrap();
    service
        .bind(bad, &[source], ConverterBinding::Convert { convert: reject }, BindingMode::OneWay)
        .unwrap();

    // The failing conversion is skipped; the good binding still evaluates.
    assert_eq!(service.set_value(source, PropertyValue::F32(7.0)), PropertySetResult::ValueChanged);
    service.execute_changes();
    assert_eq!(service.get_value(good), Some(PropertyValue::F32(7.0)));
    assert_eq!(service.get_value(bad), Some(PropertyValue::F32(0.0)));
}
