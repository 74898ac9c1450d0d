//! Single-pass Pratt compiler: tokens go straight to bytecode, with no AST
//! in between. Lexical scope and local-variable slots are tracked at
//! compile time; a stack of `FunctionFrame`s mirrors the nesting of `func`
//! declarations being compiled.

use std::rc::Rc;

use crate::chunk::{Chunk, OpCode};
use crate::error::CompileError;
use crate::scanner::{Scanner, Token, TokenKind};
use crate::table::Table;
use crate::value::{intern_string, ObjFunction, ObjString, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    None,
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    fn next(self) -> Precedence {
        use Precedence::*;
        match self {
            None => Assignment,
            Assignment => Or,
            Or => And,
            And => Equality,
            Equality => Comparison,
            Comparison => Term,
            Term => Factor,
            Factor => Unary,
            Unary => Call,
            Call | Primary => Primary,
        }
    }
}

type ParseFn<'a> = fn(&mut Compiler<'a>, bool);

struct ParseRule<'a> {
    prefix: Option<ParseFn<'a>>,
    infix: Option<ParseFn<'a>>,
    precedence: Precedence,
}

fn get_rule<'a>(kind: TokenKind) -> ParseRule<'a> {
    use TokenKind::*;
    let rule = |prefix, infix, precedence| ParseRule {
        prefix,
        infix,
        precedence,
    };
    match kind {
        LeftParen => rule(Some(Compiler::grouping), Some(Compiler::call), Precedence::Call),
        Minus => rule(Some(Compiler::unary), Some(Compiler::binary), Precedence::Term),
        Plus => rule(None, Some(Compiler::binary), Precedence::Term),
        Slash => rule(None, Some(Compiler::binary), Precedence::Factor),
        Star => rule(None, Some(Compiler::binary), Precedence::Factor),
        Bang => rule(Some(Compiler::unary), None, Precedence::None),
        BangEqual => rule(None, Some(Compiler::binary), Precedence::Equality),
        EqualEqual => rule(None, Some(Compiler::binary), Precedence::Equality),
        Greater => rule(None, Some(Compiler::binary), Precedence::Comparison),
        GreaterEqual => rule(None, Some(Compiler::binary), Precedence::Comparison),
        Less => rule(None, Some(Compiler::binary), Precedence::Comparison),
        LessEqual => rule(None, Some(Compiler::binary), Precedence::Comparison),
        Identifier => rule(Some(Compiler::variable), None, Precedence::None),
        String => rule(Some(Compiler::string), None, Precedence::None),
        Number => rule(Some(Compiler::number), None, Precedence::None),
        And => rule(None, Some(Compiler::and_), Precedence::And),
        Or => rule(None, Some(Compiler::or_), Precedence::Or),
        False => rule(Some(Compiler::literal), None, Precedence::None),
        Nil => rule(Some(Compiler::literal), None, Precedence::None),
        True => rule(Some(Compiler::literal), None, Precedence::None),
        _ => rule(None, None, Precedence::None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionType {
    Function,
    Script,
}

struct Local<'a> {
    name: &'a str,
    depth: i32,
}

struct FunctionFrame<'a> {
    function: ObjFunction,
    function_type: FunctionType,
    locals: Vec<Local<'a>>,
    scope_depth: i32,
}

pub struct Compiler<'a> {
    scanner: Scanner<'a>,
    previous: Token<'a>,
    current: Token<'a>,
    had_error: bool,
    panic_mode: bool,
    errors: Vec<CompileError>,
    frames: Vec<FunctionFrame<'a>>,
    strings: &'a mut Table,
}

impl<'a> Compiler<'a> {
    fn new(source: &'a str, strings: &'a mut Table) -> Self {
        let eof = Token {
            kind: TokenKind::Eof,
            lexeme: "",
            line: 0,
        };
        Compiler {
            scanner: Scanner::new(source),
            previous: eof,
            current: eof,
            had_error: false,
            panic_mode: false,
            errors: Vec::new(),
            frames: Vec::new(),
            strings,
        }
    }

    // -- frame / chunk plumbing ------------------------------------------

    fn push_frame(&mut self, function_type: FunctionType, name: Option<Rc<ObjString>>) {
        // Slot 0 is reserved for the callee value itself; see vm.rs.
        let locals = vec![Local { name: "", depth: 0 }];
        self.frames.push(FunctionFrame {
            function: ObjFunction {
                arity: 0,
                chunk: Chunk::new(),
                name,
            },
            function_type,
            locals,
            scope_depth: 0,
        });
    }

    fn pop_frame(&mut self) -> ObjFunction {
        self.emit_return();
        self.frames.pop().expect("pop_frame without a matching push").function
    }

    fn current_frame(&self) -> &FunctionFrame<'a> {
        self.frames.last().expect("no active function frame")
    }

    fn current_frame_mut(&mut self) -> &mut FunctionFrame<'a> {
        self.frames.last_mut().expect("no active function frame")
    }

    fn current_chunk(&self) -> &Chunk {
        &self.current_frame().function.chunk
    }

    fn current_chunk_mut(&mut self) -> &mut Chunk {
        &mut self.current_frame_mut().function.chunk
    }

    // -- token stream -----------------------------------------------------

    fn advance(&mut self) {
        self.previous = self.current;
        loop {
            self.current = self.scanner.scan_token();
            if self.current.kind != TokenKind::Error {
                break;
            }
            let message = self.current.lexeme.to_string();
            self.error_at_current(&message);
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) {
        if self.current.kind == kind {
            self.advance();
        } else {
            self.error_at_current(message);
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if !self.check(kind) {
            return false;
        }
        self.advance();
        true
    }

    fn error_at_current(&mut self, message: &str) {
        let token = self.current;
        self.error_at(token, message);
    }

    fn error(&mut self, message: &str) {
        let token = self.previous;
        self.error_at(token, message);
    }

    fn error_at(&mut self, token: Token<'a>, message: &str) {
        if self.panic_mode {
            return;
        }
        self.panic_mode = true;
        let loc = match token.kind {
            TokenKind::Eof => " at end".to_string(),
            TokenKind::Error => String::new(),
            _ => format!(" at '{}'", token.lexeme),
        };
        self.errors.push(CompileError {
            line: token.line,
            loc,
            message: message.to_string(),
        });
        self.had_error = true;
    }

    // -- bytecode emission --------------------------------------------------

    fn emit_byte(&mut self, byte: u8) {
        let line = self.previous.line;
        self.current_chunk_mut().write(byte, line);
    }

    fn emit_op(&mut self, op: OpCode) {
        self.emit_byte(op as u8);
    }

    fn emit_bytes(&mut self, a: u8, b: u8) {
        self.emit_byte(a);
        self.emit_byte(b);
    }

    fn emit_two_ops(&mut self, a: OpCode, b: OpCode) {
        self.emit_op(a);
        self.emit_op(b);
    }

    fn emit_jump(&mut self, op: OpCode) -> usize {
        self.emit_op(op);
        self.emit_byte(0xff);
        self.emit_byte(0xff);
        self.current_chunk().code.len() - 2
    }

    fn patch_jump(&mut self, offset: usize) {
        let jump = self.current_chunk().code.len() - offset - 2;
        if jump > u16::MAX as usize {
            self.error("Too much code to jump over.");
            return;
        }
        let bytes = (jump as u16).to_be_bytes();
        let chunk = self.current_chunk_mut();
        chunk.code[offset] = bytes[0];
        chunk.code[offset + 1] = bytes[1];
    }

    fn emit_loop(&mut self, loop_start: usize) {
        self.emit_op(OpCode::Loop);
        let offset = self.current_chunk().code.len() - loop_start + 2;
        if offset > u16::MAX as usize {
            self.error("Loop body too large.");
            return;
        }
        let bytes = (offset as u16).to_be_bytes();
        self.emit_byte(bytes[0]);
        self.emit_byte(bytes[1]);
    }

    fn emit_return(&mut self) {
        self.emit_op(OpCode::Nil);
        self.emit_op(OpCode::Return);
    }

    fn make_constant(&mut self, value: Value) -> u8 {
        match self.current_frame_mut().function.chunk.add_constant(value) {
            Some(idx) => idx,
            None => {
                self.error("Too many constants in one chunk");
                0
            }
        }
    }

    fn emit_constant(&mut self, value: Value) {
        let idx = self.make_constant(value);
        self.emit_bytes(OpCode::Constant as u8, idx);
    }

    fn identifier_constant(&mut self, name: &str) -> u8 {
        let interned = intern_string(self.strings, name);
        self.make_constant(Value::String(interned))
    }

    // -- scopes and locals --------------------------------------------------

    fn begin_scope(&mut self) {
        self.current_frame_mut().scope_depth += 1;
    }

    fn end_scope(&mut self) {
        self.current_frame_mut().scope_depth -= 1;
        let depth = self.current_frame().scope_depth;
        loop {
            let should_pop = matches!(
                self.current_frame().locals.last(),
                Some(local) if local.depth > depth
            );
            if !should_pop {
                break;
            }
            self.emit_op(OpCode::Pop);
            self.current_frame_mut().locals.pop();
        }
    }

    fn add_local(&mut self, name: &'a str) {
        if self.current_frame().locals.len() >= 256 {
            self.error("Too many local variables in function.");
            return;
        }
        self.current_frame_mut().locals.push(Local { name, depth: -1 });
    }

    fn declare_variable(&mut self) {
        if self.current_frame().scope_depth == 0 {
            return;
        }
        let name = self.previous.lexeme;
        let scope_depth = self.current_frame().scope_depth;
        for local in self.current_frame().locals.iter().rev() {
            if local.depth != -1 && local.depth < scope_depth {
                break;
            }
            if local.name == name {
                self.error("Already a variable with this name in this scope.");
                return;
            }
        }
        self.add_local(name);
    }

    fn parse_variable(&mut self, message: &str) -> u8 {
        self.consume(TokenKind::Identifier, message);
        self.declare_variable();
        if self.current_frame().scope_depth > 0 {
            return 0;
        }
        let name = self.previous.lexeme;
        self.identifier_constant(name)
    }

    fn mark_initialized(&mut self) {
        if self.current_frame().scope_depth == 0 {
            return;
        }
        let depth = self.current_frame().scope_depth;
        let frame = self.current_frame_mut();
        let len = frame.locals.len();
        frame.locals[len - 1].depth = depth;
    }

    fn define_variable(&mut self, global: u8) {
        if self.current_frame().scope_depth > 0 {
            self.mark_initialized();
            return;
        }
        self.emit_bytes(OpCode::DefineGlobal as u8, global);
    }

    /// Scans slots top-down, including slot 0, per the corrected resolution
    /// order (a bottom-exclusive scan would make a scope's first local
    /// unresolvable).
    fn resolve_local(&mut self, name: &str) -> Option<u8> {
        let locals = &self.current_frame().locals;
        for i in (0..locals.len()).rev() {
            if locals[i].name == name {
                if locals[i].depth == -1 {
                    self.error("Can't read local variable in its own initializer");
                }
                return Some(i as u8);
            }
        }
        None
    }

    fn named_variable(&mut self, name: &'a str, can_assign: bool) {
        let (get_op, set_op, arg) = if let Some(slot) = self.resolve_local(name) {
            (OpCode::GetLocal, OpCode::SetLocal, slot)
        } else {
            let idx = self.identifier_constant(name);
            (OpCode::GetGlobal, OpCode::SetGlobal, idx)
        };

        if can_assign && self.match_token(TokenKind::Equal) {
            self.expression();
            self.emit_bytes(set_op as u8, arg);
        } else {
            self.emit_bytes(get_op as u8, arg);
        }
    }

    // -- expressions ----------------------------------------------------------

    fn parse_precedence(&mut self, precedence: Precedence) {
        self.advance();
        let prefix_rule = get_rule(self.previous.kind).prefix;
        let Some(prefix_rule) = prefix_rule else {
            self.error("Expect expression");
            return;
        };
        let can_assign = precedence <= Precedence::Assignment;
        prefix_rule(self, can_assign);

        while precedence <= get_rule(self.current.kind).precedence {
            self.advance();
            let infix_rule = get_rule(self.previous.kind)
                .infix
                .expect("infix precedence table entry without an infix rule");
            infix_rule(self, can_assign);
        }

        if can_assign && self.match_token(TokenKind::Equal) {
            self.error("Invalid assignment target");
        }
    }

    fn expression(&mut self) {
        self.parse_precedence(Precedence::Assignment);
    }

    fn number(&mut self, _can_assign: bool) {
        let value: f64 = self.previous.lexeme.parse().unwrap_or(0.0);
        self.emit_constant(Value::Number(value));
    }

    fn string(&mut self, _can_assign: bool) {
        let raw = self.previous.lexeme;
        let content = &raw[1..raw.len() - 1];
        let interned = intern_string(self.strings, content);
        self.emit_constant(Value::String(interned));
    }

    fn variable(&mut self, can_assign: bool) {
        let name = self.previous.lexeme;
        self.named_variable(name, can_assign);
    }

    fn grouping(&mut self, _can_assign: bool) {
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after expression.");
    }

    fn unary(&mut self, _can_assign: bool) {
        let operator = self.previous.kind;
        self.parse_precedence(Precedence::Unary);
        match operator {
            TokenKind::Minus => self.emit_op(OpCode::Negate),
            TokenKind::Bang => self.emit_op(OpCode::Not),
            _ => unreachable!("unary() called for non-unary token"),
        }
    }

    fn binary(&mut self, _can_assign: bool) {
        let operator = self.previous.kind;
        let rule = get_rule(operator);
        self.parse_precedence(rule.precedence.next());
        match operator {
            TokenKind::BangEqual => self.emit_two_ops(OpCode::Equal, OpCode::Not),
            TokenKind::EqualEqual => self.emit_op(OpCode::Equal),
            TokenKind::Greater => self.emit_op(OpCode::Greater),
            TokenKind::GreaterEqual => self.emit_two_ops(OpCode::Less, OpCode::Not),
            TokenKind::Less => self.emit_op(OpCode::Less),
            TokenKind::LessEqual => self.emit_two_ops(OpCode::Greater, OpCode::Not),
            TokenKind::Plus => self.emit_op(OpCode::Add),
            TokenKind::Minus => self.emit_op(OpCode::Subtract),
            TokenKind::Star => self.emit_op(OpCode::Multiply),
            TokenKind::Slash => self.emit_op(OpCode::Divide),
            _ => unreachable!("binary() called for non-binary token"),
        }
    }

    fn literal(&mut self, _can_assign: bool) {
        match self.previous.kind {
            TokenKind::False => self.emit_op(OpCode::False),
            TokenKind::Nil => self.emit_op(OpCode::Nil),
            TokenKind::True => self.emit_op(OpCode::True),
            _ => unreachable!("literal() called for non-literal token"),
        }
    }

    fn and_(&mut self, _can_assign: bool) {
        let end_jump = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.parse_precedence(Precedence::And);
        self.patch_jump(end_jump);
    }

    fn or_(&mut self, _can_assign: bool) {
        let else_jump = self.emit_jump(OpCode::JumpIfFalse);
        let end_jump = self.emit_jump(OpCode::Jump);
        self.patch_jump(else_jump);
        self.emit_op(OpCode::Pop);
        self.parse_precedence(Precedence::Or);
        self.patch_jump(end_jump);
    }

    fn call(&mut self, _can_assign: bool) {
        let argc = self.argument_list();
        self.emit_bytes(OpCode::Call as u8, argc);
    }

    fn argument_list(&mut self) -> u8 {
        let mut argc: u32 = 0;
        if !self.check(TokenKind::RightParen) {
            loop {
                self.expression();
                if argc == 255 {
                    self.error("Can't have more than 255 arguments.");
                }
                argc += 1;
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after arguments.");
        argc as u8
    }

    // -- statements -------------------------------------------------------

    fn declaration(&mut self) {
        if self.match_token(TokenKind::Func) {
            self.func_declaration();
        } else if self.match_token(TokenKind::Var) {
            self.var_declaration();
        } else {
            self.statement();
        }

        if self.panic_mode {
            self.synchronize();
        }
    }

    fn func_declaration(&mut self) {
        let global = self.parse_variable("Expect function name.");
        self.mark_initialized();
        let name = self.previous.lexeme;
        let name_obj = intern_string(self.strings, name);
        self.function(FunctionType::Function, Some(name_obj));
        self.define_variable(global);
    }

    fn function(&mut self, function_type: FunctionType, name: Option<Rc<ObjString>>) {
        self.push_frame(function_type, name);
        self.begin_scope();

        self.consume(TokenKind::LeftParen, "Expect '(' after function name.");
        if !self.check(TokenKind::RightParen) {
            loop {
                if self.current_frame().function.arity == 255 {
                    self.error_at_current("Can't have more than 255 parameters.");
                }
                self.current_frame_mut().function.arity += 1;
                let constant = self.parse_variable("Expect parameter name.");
                self.define_variable(constant);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "Expect ')' after parameters.");
        self.consume(TokenKind::LeftBrace, "Expect '{' before function body.");
        self.block();

        let function = self.pop_frame();
        let idx = self.make_constant(Value::Function(Rc::new(function)));
        self.emit_bytes(OpCode::Constant as u8, idx);
    }

    fn var_declaration(&mut self) {
        let global = self.parse_variable("Expect variable name.");
        if self.match_token(TokenKind::Equal) {
            self.expression();
        } else {
            self.emit_op(OpCode::Nil);
        }
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.");
        self.define_variable(global);
    }

    fn statement(&mut self) {
        if self.match_token(TokenKind::Print) {
            self.print_statement();
        } else if self.match_token(TokenKind::For) {
            self.for_statement();
        } else if self.match_token(TokenKind::If) {
            self.if_statement();
        } else if self.match_token(TokenKind::Return) {
            self.return_statement();
        } else if self.match_token(TokenKind::While) {
            self.while_statement();
        } else if self.match_token(TokenKind::LeftBrace) {
            self.begin_scope();
            self.block();
            self.end_scope();
        } else {
            self.expression_statement();
        }
    }

    fn print_statement(&mut self) {
        self.expression();
        self.consume(TokenKind::Semicolon, "Expect ';' after value.");
        self.emit_op(OpCode::Print);
    }

    fn expression_statement(&mut self) {
        self.expression();
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.");
        self.emit_op(OpCode::Pop);
    }

    fn return_statement(&mut self) {
        if self.current_frame().function_type == FunctionType::Script {
            self.error("Can't return from top-level code.");
        }
        if self.match_token(TokenKind::Semicolon) {
            self.emit_return();
        } else {
            self.expression();
            self.consume(TokenKind::Semicolon, "Expect ';' after return value.");
            self.emit_op(OpCode::Return);
        }
    }

    fn if_statement(&mut self) {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.");
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after condition.");

        let then_jump = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.statement();

        let else_jump = self.emit_jump(OpCode::Jump);
        self.patch_jump(then_jump);
        self.emit_op(OpCode::Pop);

        if self.match_token(TokenKind::Else) {
            self.statement();
        }
        self.patch_jump(else_jump);
    }

    fn while_statement(&mut self) {
        let loop_start = self.current_chunk().code.len();
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.");
        self.expression();
        self.consume(TokenKind::RightParen, "Expect ')' after condition.");

        let exit_jump = self.emit_jump(OpCode::JumpIfFalse);
        self.emit_op(OpCode::Pop);
        self.statement();
        self.emit_loop(loop_start);

        self.patch_jump(exit_jump);
        self.emit_op(OpCode::Pop);
    }

    fn for_statement(&mut self) {
        self.begin_scope();
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.");
        if self.match_token(TokenKind::Semicolon) {
            // no initializer
        } else if self.match_token(TokenKind::Var) {
            self.var_declaration();
        } else {
            self.expression_statement();
        }

        let mut loop_start = self.current_chunk().code.len();
        let mut exit_jump = None;
        if !self.match_token(TokenKind::Semicolon) {
            self.expression();
            self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.");
            exit_jump = Some(self.emit_jump(OpCode::JumpIfFalse));
            self.emit_op(OpCode::Pop);
        }

        if !self.match_token(TokenKind::RightParen) {
            let body_jump = self.emit_jump(OpCode::Jump);
            let increment_start = self.current_chunk().code.len();
            self.expression();
            self.emit_op(OpCode::Pop);
            self.consume(TokenKind::RightParen, "Expect ')' after for clauses.");

            self.emit_loop(loop_start);
            loop_start = increment_start;
            self.patch_jump(body_jump);
        }

        self.statement();
        self.emit_loop(loop_start);

        if let Some(exit_jump) = exit_jump {
            self.patch_jump(exit_jump);
            self.emit_op(OpCode::Pop);
        }

        self.end_scope();
    }

    fn block(&mut self) {
        while !self.check(TokenKind::RightBrace) && !self.check(TokenKind::Eof) {
            self.declaration();
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.");
    }

    fn synchronize(&mut self) {
        self.panic_mode = false;
        while self.current.kind != TokenKind::Eof {
            if self.previous.kind == TokenKind::Semicolon {
                return;
            }
            match self.current.kind {
                TokenKind::Class
                | TokenKind::Func
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => {}
            }
            self.advance();
        }
    }
}

/// Compiles `source` into the top-level script `Function`, interning any
/// string literals and identifiers against `strings` (the VM's shared
/// intern pool, so literal and runtime-built strings can compare equal by
/// identity). Returns every diagnostic collected, in emission order, on
/// failure.
pub fn compile(source: &str, strings: &mut Table) -> std::result::Result<Rc<ObjFunction>, Vec<CompileError>> {
    let mut compiler = Compiler::new(source, strings);
    compiler.push_frame(FunctionType::Script, None);
    compiler.advance();
    while !compiler.match_token(TokenKind::Eof) {
        compiler.declaration();
    }
    let function = compiler.pop_frame();

    if compiler.had_error {
        Err(compiler.errors)
    } else {
        Ok(Rc::new(function))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_ok(source: &str) -> Rc<ObjFunction> {
        let mut strings = Table::new();
        compile(source, &mut strings).expect("expected a successful compile")
    }

    fn compile_err(source: &str) -> Vec<CompileError> {
        let mut strings = Table::new();
        compile(source, &mut strings).expect_err("expected a compile error")
    }

    #[test]
    fn top_level_script_has_no_name() {
        let function = compile_ok("print 1;");
        assert!(function.name.is_none());
    }

    #[test]
    fn redeclaring_a_local_in_the_same_scope_is_an_error() {
        let errors = compile_err("{ var x; var x; }");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Already a variable"));
    }

    #[test]
    fn returning_from_top_level_code_is_an_error() {
        let errors = compile_err("return 1;");
        assert!(errors[0].message.contains("top-level code"));
    }

    #[test]
    fn jump_targets_land_within_byte_range() {
        // a deliberately long `if` body should still compile: exercises
        // patch_jump on a realistic (not pathological) offset.
        let body: String = "print 1;\n".repeat(50);
        let source = format!("if (true) {{ {body} }}");
        compile_ok(&source);
    }
}
