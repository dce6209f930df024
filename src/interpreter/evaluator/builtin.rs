use crate::{
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    vocabulary::Builtin,
};

/// Detection, segmentation and classification handlers, and the handlers
/// that filter or read their results.
pub mod detection;
/// Loading, saving, transforming and showing images.
pub mod image;
/// Model selection and training.
pub mod model;
/// Output, help, imports and session control.
pub mod script;

impl Interpreter {
    /// Runs the handler of a builtin.
    ///
    /// Arguments are already evaluated and their count already matches the
    /// builtin's arity. Handlers may read and write the session and call the
    /// vision backend, but history bookkeeping is left to the caller.
    pub(crate) fn dispatch(&mut self, builtin: Builtin, args: &[Value], line: usize) -> EvalResult<Value> {
        match builtin {
            Builtin::Load => self.load(args, line),
            Builtin::Save => self.save(args, line),
            Builtin::Classify => self.classify(args, line),
            Builtin::Size => self.size(line),
            Builtin::Say => self.say(args, line),
            Builtin::Detect => self.detect(args, line),
            Builtin::Segment => self.segment(args, line),
            Builtin::Cutout => self.cutout(line),
            Builtin::Count => self.count(args, line),
            Builtin::CountInRegion => self.count_in_region(args, line),
            Builtin::Replace => self.replace(args, line),
            Builtin::Show => self.show(line),
            Builtin::Exit => Ok(self.exit()),
            Builtin::Help => self.help(args, line),
            Builtin::Train => self.train(args, line),
            Builtin::Compare => self.compare(line),
            Builtin::Read => Ok(self.read()),
            Builtin::Label => self.label(args, line),
            Builtin::Get => self.get(args, line),
            Builtin::Use => self.use_model(args, line),
            Builtin::Caption => self.caption(line),
            Builtin::Import => self.import(args, line),
            Builtin::Rotate => self.rotate(args, line),
            Builtin::GetColours => self.get_colours(args, line),
            Builtin::GetText => self.get_text(line),
            Builtin::Greyscale => self.greyscale(line),
            Builtin::Select => self.select(args, line),
            Builtin::Paste => self.paste(args, line),
            Builtin::PasteRandom => self.paste_random(line),
            Builtin::Resize => self.resize(args, line),
            Builtin::Blur => self.blur(args, line),
            Builtin::SetBrightness => self.set_brightness(args, line),
            Builtin::Search => self.search(args, line),
            Builtin::Similarity => self.similarity(args, line),
            Builtin::ReadQR => self.read_qr(line),
            Builtin::Reset => Ok(self.reset()),
            Builtin::GetEdges => self.get_edges(line),
            Builtin::SetConfidence => self.set_confidence(args, line),
        }
    }
}
