fn main() {
    slint_build::compile("ui/polaris.slint").expect("Slint build failed");
}
